//! AFLR3 binary UGRID reader/writer.
//!
//! # Layout
//! All integers are 32-bit; the byte order and the coordinate width come from
//! the [`FormatVariant`]. Blocks follow each other with no padding, and a block
//! whose count is zero is absent.
//!
//! ```text
//! [i32 x 7]                      nnodes ntris nquads ntets npyramids nprisms nhexas
//! [float x 3*nnodes]             node coordinates
//! [i32 x 3*ntris]                tri vertex ids
//! [i32 x 4*nquads]               quad vertex ids
//! [i32 x ntris+nquads]           surface property ids
//! [i32 x 4*ntets]                tet vertex ids
//! [i32 x 5*npyramids]            pyramid vertex ids
//! [i32 x 6*nprisms]              prism vertex ids
//! [i32 x 8*nhexas]               hex vertex ids
//! ```
//!
//! Each block is moved with a single read or write call straight into (or out
//! of) its final buffer; only the byte swap touches individual values. A
//! stream of unknown length is the exception on the read side: its blocks are
//! staged so that a corrupt header count cannot force a huge allocation.

use crate::data::mesh::{Mesh, MeshCounts, NodeId};
use crate::debug_invariants::DebugInvariants;
use crate::io::variant::{ByteOrder, FloatWidth, FormatVariant};
use crate::io::{MeshReader, MeshWriter};
use crate::mesh_error::UgridError;
use crate::topology::cell_type::CellType;
use crate::topology::validation::{check_hanging_nodes, check_node_id_range};
use bytemuck::Pod;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;

/// Initial buffer for a block read from a stream of unknown length.
const STREAM_CHUNK: u64 = 1 << 20;

const HEADER_FIELDS: [&str; 7] = [
    "nnodes",
    "ntris",
    "nquads",
    "ntets",
    "npyramids",
    "nprisms",
    "nhexas",
];

/// Optional settings for UGRID import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UgridReadOptions {
    /// Keep the surface blocks. When disabled the bytes are still consumed.
    pub read_shells: bool,
    /// Read the volume blocks. When disabled reading stops after the surface ids.
    pub read_solids: bool,
    /// Run the hanging-node and vertex-uniqueness checks after reading solids.
    pub check: bool,
}

impl Default for UgridReadOptions {
    fn default() -> Self {
        Self {
            read_shells: true,
            read_solids: true,
            check: true,
        }
    }
}

/// Optional settings for UGRID export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UgridWriteOptions {
    /// Refuse to write a mesh without surface elements.
    pub check_shells: bool,
    /// Refuse to write a mesh without volume elements.
    pub check_solids: bool,
    /// Run the hanging-node check after writing.
    pub check: bool,
}

impl Default for UgridWriteOptions {
    fn default() -> Self {
        Self {
            check_shells: true,
            check_solids: true,
            check: true,
        }
    }
}

/// Binary UGRID reader for one format variant.
#[derive(Debug, Clone, Copy)]
pub struct UgridReader {
    variant: FormatVariant,
    options: UgridReadOptions,
}

impl UgridReader {
    pub fn new(variant: FormatVariant) -> Self {
        Self::with_options(variant, UgridReadOptions::default())
    }

    pub fn with_options(variant: FormatVariant, options: UgridReadOptions) -> Self {
        Self { variant, options }
    }

    pub fn variant(&self) -> FormatVariant {
        self.variant
    }

    /// Read a mesh whose total byte length is known up front.
    ///
    /// With a known length an oversized block is rejected before its buffer
    /// is allocated.
    pub fn read_with_len<R: Read>(&self, reader: R, len: Option<u64>) -> Result<Mesh, UgridError> {
        let mut blocks = BlockReader::new(reader, self.variant.byte_order, len);
        let counts = blocks.read_header()?;
        log::info!(
            "nnodes={:.3}m ntris={} nquads={} ntets={:.3}m npyramids={:.3}m nprisms={:.3}m nhexas={:.3}m",
            counts.nodes as f64 / 1e6,
            counts.tris,
            counts.quads,
            counts.tets as f64 / 1e6,
            counts.pyramids as f64 / 1e6,
            counts.prisms as f64 / 1e6,
            counts.hexas as f64 / 1e6,
        );
        log::info!(
            "nsurface_elements={} nvolume_elements={:.3}m",
            counts.surface_elements(),
            counts.volume_elements() as f64 / 1e6
        );

        log::debug!("reading nodes as {:?}", self.variant.float_width);
        let nodes = blocks.read_nodes(counts.nodes, self.variant.float_width)?;

        let mut builder = Mesh::builder().nodes(nodes);
        if self.options.read_shells {
            builder = builder
                .tris(blocks.read_cells::<3>(CellType::Triangle, counts.tris)?)
                .quads(blocks.read_cells::<4>(CellType::Quadrilateral, counts.quads)?)
                .surface_ids(blocks.read_surface_ids(counts.surface_elements())?);
        } else {
            blocks.skip(CellType::Triangle.block_name(), block_len(counts.tris, 3)?)?;
            blocks.skip(CellType::Quadrilateral.block_name(), block_len(counts.quads, 4)?)?;
            blocks.skip("surface_ids", block_len(counts.surface_elements(), 1)?)?;
        }

        if !self.options.read_solids {
            let mesh = builder.solids_read(false).build();
            crate::debug_invariants!(mesh.validate_invariants(), "surface-only UGRID read");
            return Ok(mesh);
        }

        let mesh = builder
            .tets(blocks.read_cells::<4>(CellType::Tetrahedron, counts.tets)?)
            .pyramids(blocks.read_cells::<5>(CellType::Pyramid, counts.pyramids)?)
            .prisms(blocks.read_cells::<6>(CellType::Prism, counts.prisms)?)
            .hexas(blocks.read_cells::<8>(CellType::Hexahedron, counts.hexas)?)
            .build();
        crate::debug_invariants!(mesh.validate_invariants(), "UGRID read");

        if self.options.check {
            check_hanging_nodes(&mesh, true)?;
        }
        Ok(mesh)
    }
}

impl MeshReader for UgridReader {
    fn read<R: Read>(&self, reader: R) -> Result<Mesh, UgridError> {
        self.read_with_len(reader, None)
    }
}

/// Binary UGRID writer for one format variant.
#[derive(Debug, Clone, Copy)]
pub struct UgridWriter {
    variant: FormatVariant,
    options: UgridWriteOptions,
}

impl UgridWriter {
    pub fn new(variant: FormatVariant) -> Self {
        Self::with_options(variant, UgridWriteOptions::default())
    }

    pub fn with_options(variant: FormatVariant, options: UgridWriteOptions) -> Self {
        Self { variant, options }
    }

    pub fn variant(&self) -> FormatVariant {
        self.variant
    }

    /// Check that `mesh` can be written under the current options.
    pub fn validate(&self, mesh: &Mesh) -> Result<(), UgridError> {
        let surface_ids = mesh.surface_ids();
        match (surface_ids.iter().min(), surface_ids.iter().max()) {
            (Some(min), Some(max)) => {
                let unique: Vec<i32> = surface_ids.iter().copied().sorted().dedup().collect();
                log::info!("nupids={unique:?} min={min} max={max}");
            }
            _ => log::warn!("no surface_ids were found"),
        }

        check_node_id_range(mesh)?;

        let nshells = mesh.num_surface_elements();
        if nshells != surface_ids.len() {
            return Err(UgridError::SurfaceIdMismatch {
                tris: mesh.tris().len(),
                quads: mesh.quads().len(),
                surface_ids: surface_ids.len(),
            });
        }
        if self.options.check_shells && nshells == 0 {
            return Err(UgridError::EmptyMesh(format!(
                "ntris={} nquads={}",
                mesh.tris().len(),
                mesh.quads().len()
            )));
        }
        if self.options.check_solids && mesh.num_volume_elements() == 0 {
            let counts = mesh.counts();
            return Err(UgridError::EmptyMesh(format!(
                "ntets={} npyramids={} nprisms={} nhexas={}",
                counts.tets, counts.pyramids, counts.prisms, counts.hexas
            )));
        }
        Ok(())
    }

    fn write_blocks<W: Write>(&self, writer: W, mesh: &Mesh) -> Result<(), UgridError> {
        let mut blocks = BlockWriter::new(writer, self.variant.byte_order);
        blocks.write_header(&mesh.counts())?;
        blocks.write_nodes(mesh.nodes(), self.variant.float_width)?;
        for cell_type in CellType::SURFACE {
            blocks.write_ids(cell_type.block_name(), mesh.connectivity(cell_type))?;
        }
        blocks.write_ids("surface_ids", mesh.surface_ids())?;
        for cell_type in CellType::VOLUME {
            blocks.write_ids(cell_type.block_name(), mesh.connectivity(cell_type))?;
        }
        blocks.finish()?;

        if self.options.check {
            check_hanging_nodes(mesh, true)?;
        }
        Ok(())
    }
}

impl MeshWriter for UgridWriter {
    fn write<W: Write>(&self, writer: W, mesh: &Mesh) -> Result<(), UgridError> {
        self.validate(mesh)?;
        self.write_blocks(writer, mesh)
    }
}

/// Read a UGRID file, resolving its variant from the filename.
pub fn read_ugrid(path: impl AsRef<Path>, options: UgridReadOptions) -> Result<Mesh, UgridError> {
    let resolved = FormatVariant::from_path(path)?;
    log::debug!("reading ugrid={:?} as {}", resolved.path, resolved.variant.tag());
    let file = File::open(&resolved.path)?;
    let len = file.metadata()?.len();
    UgridReader::with_options(resolved.variant, options).read_with_len(file, Some(len))
}

/// Write a UGRID file in the variant declared by the output filename.
///
/// The output name may declare a different variant than the file the mesh
/// was read from; this is how grids are converted between variants.
pub fn write_ugrid(
    path: impl AsRef<Path>,
    mesh: &Mesh,
    options: UgridWriteOptions,
) -> Result<(), UgridError> {
    let resolved = FormatVariant::from_path(path)?;
    let writer = UgridWriter::with_options(resolved.variant, options);
    writer.validate(mesh)?;
    log::debug!("writing ugrid={:?} as {}", resolved.path, resolved.variant.tag());
    let file = File::create(&resolved.path)?;
    writer.write_blocks(BufWriter::new(file), mesh)
}

fn block_len(count: usize, values_per_record: usize) -> Result<u64, UgridError> {
    (count as u64)
        .checked_mul(values_per_record as u64 * 4)
        .ok_or(UgridError::HeaderCount {
            field: "block length",
            value: count as i64,
        })
}

/// Sequential block reader that tracks how many bytes are left.
struct BlockReader<R> {
    inner: R,
    order: ByteOrder,
    remaining: Option<u64>,
}

impl<R: Read> BlockReader<R> {
    fn new(inner: R, order: ByteOrder, len: Option<u64>) -> Self {
        Self {
            inner,
            order,
            remaining: len,
        }
    }

    fn reserve(&self, block: &'static str, expected: u64) -> Result<(), UgridError> {
        match self.remaining {
            Some(available) if expected > available => Err(UgridError::Truncated {
                block,
                expected,
                available,
            }),
            _ => Ok(()),
        }
    }

    /// Fill `buf` completely or report how many bytes the stream had left.
    fn fill(&mut self, block: &'static str, buf: &mut [u8]) -> Result<(), UgridError> {
        let expected = buf.len() as u64;
        self.reserve(block, expected)?;
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= filled as u64;
        }
        if filled < buf.len() {
            return Err(UgridError::Truncated {
                block,
                expected,
                available: filled as u64,
            });
        }
        Ok(())
    }

    fn skip(&mut self, block: &'static str, nbytes: u64) -> Result<(), UgridError> {
        if nbytes == 0 {
            return Ok(());
        }
        self.reserve(block, nbytes)?;
        let skipped = std::io::copy(&mut (&mut self.inner).take(nbytes), &mut std::io::sink())?;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= skipped;
        }
        if skipped < nbytes {
            return Err(UgridError::Truncated {
                block,
                expected: nbytes,
                available: skipped,
            });
        }
        Ok(())
    }

    fn read_header(&mut self) -> Result<MeshCounts, UgridError> {
        let mut raw = [0i32; 7];
        self.fill("header", bytemuck::cast_slice_mut(&mut raw))?;
        let mut counts = [0usize; 7];
        for ((count, &value), field) in counts.iter_mut().zip(&raw).zip(HEADER_FIELDS) {
            let value = self.order.swap_i32(value);
            *count = usize::try_from(value).map_err(|_| UgridError::HeaderCount {
                field,
                value: value.into(),
            })?;
        }
        let [nodes, tris, quads, tets, pyramids, prisms, hexas] = counts;
        Ok(MeshCounts {
            nodes,
            tris,
            quads,
            tets,
            pyramids,
            prisms,
            hexas,
        })
    }

    /// Read `count` records of `T` as one block.
    ///
    /// With a known length the final buffer is allocated up front, after the
    /// length check. Without one, the bytes are pulled through `take` so the
    /// buffer only grows with data that actually arrives.
    fn read_block<T: Pod>(
        &mut self,
        block: &'static str,
        field: &'static str,
        count: usize,
    ) -> Result<Vec<T>, UgridError> {
        let expected = (count as u64)
            .checked_mul(size_of::<T>() as u64)
            .ok_or(UgridError::HeaderCount {
                field,
                value: count as i64,
            })?;
        if self.remaining.is_some() {
            self.reserve(block, expected)?;
            let mut records = vec![T::zeroed(); count];
            self.fill(block, bytemuck::cast_slice_mut(&mut records))?;
            return Ok(records);
        }

        let mut bytes = Vec::with_capacity(expected.min(STREAM_CHUNK) as usize);
        (&mut self.inner).take(expected).read_to_end(&mut bytes)?;
        if (bytes.len() as u64) < expected {
            return Err(UgridError::Truncated {
                block,
                expected,
                available: bytes.len() as u64,
            });
        }
        let mut records = vec![T::zeroed(); count];
        bytemuck::cast_slice_mut(&mut records).copy_from_slice(&bytes);
        Ok(records)
    }

    fn read_nodes(
        &mut self,
        count: usize,
        width: FloatWidth,
    ) -> Result<Vec<[f64; 3]>, UgridError> {
        let order = self.order;
        match width {
            FloatWidth::Double => {
                let mut nodes: Vec<[f64; 3]> = self.read_block("nodes", "nnodes", count)?;
                for value in nodes.as_flattened_mut() {
                    *value = f64::from_bits(order.swap_u64(value.to_bits()));
                }
                Ok(nodes)
            }
            FloatWidth::Single => {
                let raw: Vec<[f32; 3]> = self.read_block("nodes", "nnodes", count)?;
                Ok(raw
                    .iter()
                    .map(|xyz| xyz.map(|v| f32::from_bits(order.swap_u32(v.to_bits())) as f64))
                    .collect())
            }
        }
    }

    fn read_cells<const N: usize>(
        &mut self,
        cell_type: CellType,
        count: usize,
    ) -> Result<Vec<[NodeId; N]>, UgridError>
    where
        [NodeId; N]: Pod,
    {
        debug_assert_eq!(cell_type.vertex_count(), N);
        if count == 0 {
            return Ok(Vec::new());
        }
        log::debug!("reading {}", cell_type.block_name());
        let block = cell_type.block_name();
        let mut cells: Vec<[NodeId; N]> = self.read_block(block, block, count)?;
        self.swap_in_place(cells.as_flattened_mut());
        Ok(cells)
    }

    fn read_surface_ids(&mut self, count: usize) -> Result<Vec<i32>, UgridError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        log::debug!("reading surface ids");
        let mut ids: Vec<i32> = self.read_block("surface_ids", "surface_ids", count)?;
        self.swap_in_place(&mut ids);
        Ok(ids)
    }

    fn swap_in_place(&self, values: &mut [i32]) {
        for value in values {
            *value = self.order.swap_i32(*value);
        }
    }
}

/// Sequential block writer; each block is encoded then written in one call.
struct BlockWriter<W: Write> {
    inner: W,
    order: ByteOrder,
}

impl<W: Write> BlockWriter<W> {
    fn new(inner: W, order: ByteOrder) -> Self {
        Self { inner, order }
    }

    fn write_header(&mut self, counts: &MeshCounts) -> Result<(), UgridError> {
        let values = [
            counts.nodes,
            counts.tris,
            counts.quads,
            counts.tets,
            counts.pyramids,
            counts.prisms,
            counts.hexas,
        ];
        let mut raw = [0i32; 7];
        for ((slot, count), block) in raw.iter_mut().zip(values).zip(HEADER_FIELDS) {
            let count32 =
                i32::try_from(count).map_err(|_| UgridError::CountOverflow { block, count })?;
            *slot = self.order.swap_i32(count32);
        }
        self.inner.write_all(bytemuck::cast_slice(&raw))?;
        Ok(())
    }

    fn write_nodes(&mut self, nodes: &[[f64; 3]], width: FloatWidth) -> Result<(), UgridError> {
        log::debug!("writing {} nodes as {width:?}", nodes.len());
        let order = self.order;
        let flat = nodes.as_flattened();
        match width {
            FloatWidth::Double => {
                let encoded: Vec<u64> = flat.iter().map(|v| order.swap_u64(v.to_bits())).collect();
                self.inner.write_all(bytemuck::cast_slice(&encoded))?;
            }
            FloatWidth::Single => {
                let encoded: Vec<u32> = flat
                    .iter()
                    .map(|&v| order.swap_u32((v as f32).to_bits()))
                    .collect();
                self.inner.write_all(bytemuck::cast_slice(&encoded))?;
            }
        }
        Ok(())
    }

    fn write_ids(&mut self, block: &'static str, ids: &[i32]) -> Result<(), UgridError> {
        if ids.is_empty() {
            return Ok(());
        }
        log::debug!("writing {block}");
        let encoded: Vec<i32> = ids.iter().map(|&id| self.order.swap_i32(id)).collect();
        self.inner.write_all(bytemuck::cast_slice(&encoded))?;
        Ok(())
    }

    fn finish(mut self) -> Result<(), UgridError> {
        self.inner.flush()?;
        Ok(())
    }
}
