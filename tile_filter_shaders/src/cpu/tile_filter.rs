// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tile_filter_encoding::{TileFilterUniforms, TilePosition, VertexOutput};

use super::{CpuBinding, Error};

/// Evaluates the vertex stage for a single tile position.
///
/// This mirrors `main` in `shader/tile_filter.wgsl` operation for operation.
/// Nothing is validated: a zero source size or non-finite uniforms yield
/// non-finite outputs, exactly as on the GPU.
#[inline]
pub fn tile_filter_vertex(
    uniforms: &TileFilterUniforms,
    tile_position: TilePosition,
) -> VertexOutput {
    let position = [
        tile_position.x as f32 * uniforms.tile_size[0],
        tile_position.y as f32 * uniforms.tile_size[1],
    ];
    let tex_coord = [
        position[0] / uniforms.source_size[0],
        position[1] / uniforms.source_size[1],
    ];
    let clip_position = uniforms
        .transform
        .mul_vec4([position[0], position[1], 0.0, 1.0]);
    VertexOutput::new(clip_position, tex_coord)
}

/// Evaluates the vertex stage for every position, writing one output per
/// position.
///
/// Nothing is written if the slices differ in length.
pub fn tile_filter_vertices(
    uniforms: &TileFilterUniforms,
    positions: &[TilePosition],
    outputs: &mut [VertexOutput],
) -> Result<(), Error> {
    if positions.len() != outputs.len() {
        return Err(Error::LengthMismatch {
            positions: positions.len(),
            outputs: outputs.len(),
        });
    }
    check_uniforms(uniforms);
    log::debug!("tile filter: evaluating {} vertices", positions.len());
    tile_filter_main(uniforms, positions, outputs);
    Ok(())
}

/// Like [`tile_filter_vertices`], allocating the output.
pub fn tile_filter_vertices_to_vec(
    uniforms: &TileFilterUniforms,
    positions: &[TilePosition],
) -> Vec<VertexOutput> {
    let mut outputs = vec![VertexOutput::default(); positions.len()];
    check_uniforms(uniforms);
    log::debug!("tile filter: evaluating {} vertices", positions.len());
    tile_filter_main(uniforms, positions, &mut outputs);
    outputs
}

/// Runs the stage over raw buffers laid out as on the GPU.
///
/// Bindings: uniforms, tile positions, read-write vertex outputs. The output
/// buffer must hold at least one [`VertexOutput`] per tile position.
pub fn tile_filter(_n_wg: u32, resources: &[CpuBinding<'_>]) {
    let uniforms = resources[0].as_typed::<TileFilterUniforms>();
    let positions = resources[1].as_slice::<TilePosition>();
    let mut outputs = resources[2].as_slice_mut::<VertexOutput>();
    let n = positions.len();
    tile_filter_main(&uniforms, &positions, &mut outputs[..n]);
}

fn check_uniforms(uniforms: &TileFilterUniforms) {
    if let Err(e) = uniforms.validate() {
        log::warn!("tile filter: degenerate uniforms, output will not be finite: {e}");
    }
}

#[cfg(not(feature = "multithreading"))]
fn tile_filter_main(
    uniforms: &TileFilterUniforms,
    positions: &[TilePosition],
    outputs: &mut [VertexOutput],
) {
    for (out, &pos) in outputs.iter_mut().zip(positions) {
        *out = tile_filter_vertex(uniforms, pos);
    }
}

#[cfg(feature = "multithreading")]
fn tile_filter_main(
    uniforms: &TileFilterUniforms,
    positions: &[TilePosition],
    outputs: &mut [VertexOutput],
) {
    use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

    outputs
        .par_iter_mut()
        .zip(positions)
        .for_each(|(out, &pos)| *out = tile_filter_vertex(uniforms, pos));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_filter_encoding::Mat4;

    fn identity_uniforms(tile_size: [f32; 2], source_size: [f32; 2]) -> TileFilterUniforms {
        TileFilterUniforms::new(Mat4::IDENTITY, tile_size, source_size)
    }

    #[test]
    fn origin_maps_to_origin() {
        let uniforms = identity_uniforms([16.0, 16.0], [256.0, 256.0]);
        let out = tile_filter_vertex(&uniforms, TilePosition::new(0, 0));
        assert_eq!(out.tex_coord, [0.0, 0.0]);
        assert_eq!(out.clip_position, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn scales_then_normalizes() {
        let uniforms = identity_uniforms([16.0, 16.0], [256.0, 256.0]);
        let out = tile_filter_vertex(&uniforms, TilePosition::new(4, 2));
        assert_eq!(out.tex_coord, [0.25, 0.125]);
        assert_eq!(out.clip_position, [64.0, 32.0, 0.0, 1.0]);
    }

    #[test]
    fn zero_source_size_is_not_an_error() {
        let uniforms = identity_uniforms([10.0, 10.0], [0.0, 10.0]);
        let out = tile_filter_vertex(&uniforms, TilePosition::new(1, 1));
        assert!(!out.tex_coord[0].is_finite());
        assert_eq!(out.tex_coord[0], f32::INFINITY);
        assert_eq!(out.tex_coord[1], 1.0);
        assert_eq!(out.clip_position, [10.0, 10.0, 0.0, 1.0]);
    }

    #[test]
    fn negative_positions() {
        let uniforms = identity_uniforms([16.0, 8.0], [64.0, 64.0]);
        let out = tile_filter_vertex(&uniforms, TilePosition::new(-3, -1));
        assert_eq!(out.tex_coord, [-0.75, -0.125]);
        assert_eq!(out.clip_position, [-48.0, -8.0, 0.0, 1.0]);
    }

    #[test]
    fn length_mismatch_writes_nothing() {
        let positions = [TilePosition::new(1, 1); 3];
        let mut outputs = [VertexOutput::default(); 2];
        let uniforms = identity_uniforms([1.0, 1.0], [1.0, 1.0]);
        let err = tile_filter_vertices(&uniforms, &positions, &mut outputs);
        assert_eq!(
            err,
            Err(Error::LengthMismatch {
                positions: 3,
                outputs: 2
            })
        );
        assert_eq!(outputs, [VertexOutput::default(); 2]);
    }
}
