//! Nastran bulk-data (`.bdf`) export of a UGRID mesh.
//!
//! # Output
//! ```text
//! $ comment header
//! MAT1, 1, 1.0e7,, 0.3
//! GRID / GRID* records               one per written node
//! PSHELL, CTRIA3, CQUAD4              when shells are included
//! PSOLID, CTETRA, CPYRAM|CPENTA,
//!     CPENTA, CHEXA                   when solids are included
//! ENDDATA
//! ```
//!
//! Element ids run from 1 over tris, quads, tets, pyramids, prisms, hexes in
//! that order; excluded shells still consume their id range. Every solid
//! uses one property id, one above the largest surface id (1 if there are
//! no surface ids).

use crate::data::mesh::{Mesh, NodeId};
use crate::io::fields::{print_float_8, print_float_16};
use crate::mesh_error::UgridError;
use crate::topology::cell_type::CellType;
use crate::topology::validation::{check_hanging_nodes, check_node_id_range};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const MATERIAL_ID: i32 = 1;

/// Width of the GRID coordinate fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldWidth {
    /// 8 character fields, `GRID`.
    Small,
    /// 16 character fields, `GRID*` with a continuation line.
    Large,
}

impl TryFrom<usize> for FieldWidth {
    type Error = UgridError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        match size {
            8 => Ok(FieldWidth::Small),
            16 => Ok(FieldWidth::Large),
            _ => Err(UgridError::InvalidOption(format!(
                "field width must be 8 or 16, got {size}"
            ))),
        }
    }
}

/// Optional settings for bulk-data export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BdfWriteOptions {
    pub include_shells: bool,
    pub include_solids: bool,
    /// Write pyramids as `CPENTA` with the apex repeated as the sixth node.
    pub convert_pyramid_to_penta: bool,
    pub field_width: FieldWidth,
    /// Run the hanging-node check before writing a mesh read with solids.
    pub check: bool,
}

impl Default for BdfWriteOptions {
    fn default() -> Self {
        Self {
            include_shells: true,
            include_solids: true,
            convert_pyramid_to_penta: true,
            field_width: FieldWidth::Large,
            check: true,
        }
    }
}

/// Sequential element-id generator threaded through one export.
#[derive(Debug, Clone, Copy)]
pub struct ElementIds {
    next: usize,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl ElementIds {
    pub fn next_id(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Reserve `n` ids without emitting anything for them.
    pub fn skip(&mut self, n: usize) {
        self.next += n;
    }
}

/// Nastran bulk-data writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct BdfWriter {
    options: BdfWriteOptions,
}

impl BdfWriter {
    pub fn new(options: BdfWriteOptions) -> Self {
        Self { options }
    }

    /// Write the whole deck for `mesh`.
    pub fn write<W: Write>(&self, mut writer: W, mesh: &Mesh) -> Result<(), UgridError> {
        check_node_id_range(mesh)?;
        if self.options.include_shells && mesh.surface_ids().len() != mesh.num_surface_elements() {
            return Err(UgridError::SurfaceIdMismatch {
                tris: mesh.tris().len(),
                quads: mesh.quads().len(),
                surface_ids: mesh.surface_ids().len(),
            });
        }
        let solid_pid = if self.options.include_solids {
            Some(solid_property_id(mesh)?)
        } else {
            None
        };

        writeln!(writer, "$ Nastran bulk data exported from AFLR3 UGRID")?;
        writeln!(writer, "$ punch=True")?;
        writeln!(writer, "MAT1, {MATERIAL_ID}, 1.0e7,, 0.3")?;

        log::debug!("writing GRIDs");
        self.write_grids(&mut writer, mesh)?;
        log::debug!("finished writing GRIDs");

        let mut eids = ElementIds::default();
        if self.options.include_shells {
            for pid in mesh.surface_ids().iter().copied().sorted().dedup() {
                writeln!(writer, "PSHELL,{pid},{MATERIAL_ID}, 0.1")?;
            }
            log::debug!("writing CTRIA3 and CQUAD4");
            let shells = CellType::SURFACE.into_iter().flat_map(|cell_type| {
                let n = cell_type.vertex_count();
                mesh.connectivity(cell_type)
                    .chunks_exact(n)
                    .map(move |element| (cell_type, element))
            });
            for ((cell_type, element), &pid) in shells.zip(mesh.surface_ids()) {
                write_card(&mut writer, cell_type.card_name(), eids.next_id(), pid, element)?;
            }
        } else {
            eids.skip(mesh.num_surface_elements());
        }

        if let Some(pid) = solid_pid {
            self.write_solids(&mut writer, mesh, &mut eids, pid)?;
        }
        writeln!(writer, "ENDDATA")?;
        writer.flush()?;
        Ok(())
    }

    fn write_grids<W: Write>(&self, writer: &mut W, mesh: &Mesh) -> Result<(), UgridError> {
        let nodes = mesh.nodes();
        if !mesh.solids_read() {
            // only nodes referenced by the shells are written, with their own ids
            let nids: Vec<NodeId> = mesh
                .connectivity(CellType::Triangle)
                .iter()
                .chain(mesh.connectivity(CellType::Quadrilateral))
                .copied()
                .sorted_unstable()
                .dedup()
                .collect();
            let out_of_range: Vec<NodeId> = nids
                .iter()
                .copied()
                .filter(|&nid| nid as usize > nodes.len())
                .collect();
            if !out_of_range.is_empty() {
                return Err(UgridError::HangingNodes {
                    node_count: nodes.len(),
                    used: nids.len(),
                    unused: Vec::new(),
                    out_of_range,
                });
            }
            for nid in nids {
                self.write_grid(writer, nid as usize, &nodes[nid as usize - 1])?;
            }
        } else {
            if self.options.check {
                check_hanging_nodes(mesh, true)?;
            }
            for (index, xyz) in nodes.iter().enumerate() {
                self.write_grid(writer, index + 1, xyz)?;
            }
        }
        Ok(())
    }

    fn write_grid<W: Write>(
        &self,
        writer: &mut W,
        nid: usize,
        xyz: &[f64; 3],
    ) -> Result<(), UgridError> {
        match self.options.field_width {
            FieldWidth::Small => writeln!(
                writer,
                "GRID    {nid:>8}{:8}{}{}{}",
                "",
                print_float_8(xyz[0]),
                print_float_8(xyz[1]),
                print_float_8(xyz[2]),
            )?,
            FieldWidth::Large => writeln!(
                writer,
                "GRID*   {nid:>16}{:16}{}{}\n*       {}",
                "",
                print_float_16(xyz[0]),
                print_float_16(xyz[1]),
                print_float_16(xyz[2]),
            )?,
        }
        Ok(())
    }

    fn write_solids<W: Write>(
        &self,
        writer: &mut W,
        mesh: &Mesh,
        eids: &mut ElementIds,
        pid: i32,
    ) -> Result<(), UgridError> {
        writeln!(writer, "PSOLID,{pid},{MATERIAL_ID}")?;
        for cell_type in CellType::VOLUME {
            let cells = mesh.connectivity(cell_type).chunks_exact(cell_type.vertex_count());
            if cell_type == CellType::Pyramid && self.options.convert_pyramid_to_penta {
                log::debug!("writing CPYRAM as CPENTA with node6=node5");
                writeln!(writer, "$ CPYRAM - CPENTA5")?;
                for cell in cells {
                    let penta = [cell[0], cell[1], cell[2], cell[3], cell[4], cell[4]];
                    write_card(writer, "CPENTA", eids.next_id(), pid, &penta)?;
                }
                continue;
            }
            log::debug!("writing {}", cell_type.card_name());
            writeln!(writer, "$ {}", cell_type.card_name())?;
            for cell in cells {
                write_card(writer, cell_type.card_name(), eids.next_id(), pid, cell)?;
            }
        }
        Ok(())
    }
}

/// One property id for every solid, one above the largest surface id.
fn solid_property_id(mesh: &Mesh) -> Result<i32, UgridError> {
    match mesh.max_surface_id() {
        Some(max_surface_id) => max_surface_id
            .checked_add(1)
            .ok_or(UgridError::PropertyIdOverflow { max_surface_id }),
        None => Ok(1),
    }
}

/// Small-field, left-justified element card. Fields past the eighth go on
/// blank-named continuation lines.
fn write_card<W: Write>(
    writer: &mut W,
    name: &str,
    eid: usize,
    pid: i32,
    nodes: &[NodeId],
) -> Result<(), UgridError> {
    let fields: Vec<String> = [eid.to_string(), pid.to_string()]
        .into_iter()
        .chain(nodes.iter().map(|nid| nid.to_string()))
        .collect();
    for (line, chunk) in fields.chunks(8).enumerate() {
        let label = if line == 0 { name } else { "" };
        write!(writer, "{label:<8}")?;
        for field in chunk {
            write!(writer, "{field:<8}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write `mesh` as a Nastran bulk-data file.
pub fn write_bdf(
    path: impl AsRef<Path>,
    mesh: &Mesh,
    options: BdfWriteOptions,
) -> Result<(), UgridError> {
    let file = File::create(path.as_ref())?;
    BdfWriter::new(options).write(BufWriter::new(file), mesh)
}
