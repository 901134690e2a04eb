use std::{io::Write, path::Path};

use anyhow::Context;
use meshdiff::{chamfer_with_config, hausdorff_with_config, rms_vertex_distance_with_config};
use meshdiff_mesh::{DefaultMesh, TriangleMesh};

use crate::args::{CompareArgs, Commands};

fn load(path: &Path, process: bool) -> anyhow::Result<DefaultMesh> {
    let mesh = meshdiff_stl::load_mesh(path, process)
        .with_context(|| format!("failed to load mesh {}", path.display()))?;
    log::info!(
        "{}: {} vertices, {} faces",
        path.display(),
        mesh.vertices().len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

fn write_chamfer<W: Write>(
    out: &mut W,
    a: &DefaultMesh,
    b: &DefaultMesh,
    args: &CompareArgs,
) -> anyhow::Result<()> {
    let d = chamfer_with_config(a, b, &args.config()).context("chamfer distance")?;
    writeln!(out, "Chamfer Distance (A→B, B→A, sym):")?;
    writeln!(out, "({}, {}, {})", d.a_to_b, d.b_to_a, d.symmetric)?;
    Ok(())
}

fn write_hausdorff<W: Write>(
    out: &mut W,
    a: &DefaultMesh,
    b: &DefaultMesh,
    args: &CompareArgs,
) -> anyhow::Result<()> {
    let d = hausdorff_with_config(a, b, &args.config()).context("hausdorff distance")?;
    writeln!(out, "Hausdorff Distance (A→B, B→A, sym):")?;
    writeln!(out, "({}, {}, {})", d.a_to_b, d.b_to_a, d.symmetric)?;
    Ok(())
}

fn write_rms<W: Write>(
    out: &mut W,
    a: &DefaultMesh,
    b: &DefaultMesh,
    args: &CompareArgs,
) -> anyhow::Result<()> {
    let rms = rms_vertex_distance_with_config(a, b, &args.config())
        .context("rms vertex distance")?;
    writeln!(out, "RMS Vertex Distance (Poisson-disk):")?;
    writeln!(out, "{rms}")?;
    Ok(())
}

/// Loads both meshes named by `command` and writes the requested metrics to `out`.
///
/// Metrics are computed one after another and nothing is written for a
/// metric that fails; the error aborts the rest of the report.
pub fn run<W: Write>(command: &Commands, out: &mut W) -> anyhow::Result<()> {
    let args = match command {
        Commands::All(args)
        | Commands::Chamfer(args)
        | Commands::Hausdorff(args)
        | Commands::Rms(args) => args,
    };
    let a = load(&args.mesh_a, !args.no_process)?;
    let b = load(&args.mesh_b, !args.no_process)?;

    match command {
        Commands::All(_) => {
            writeln!(out, "=== 3D METRIC RESULTS ===")?;
            writeln!(out)?;
            write_chamfer(out, &a, &b, args)?;
            writeln!(out)?;
            write_hausdorff(out, &a, &b, args)?;
            writeln!(out)?;
            write_rms(out, &a, &b, args)?;
        }
        Commands::Chamfer(_) => write_chamfer(out, &a, &b, args)?,
        Commands::Hausdorff(_) => write_hausdorff(out, &a, &b, args)?,
        Commands::Rms(_) => write_rms(out, &a, &b, args)?,
    }
    Ok(())
}
