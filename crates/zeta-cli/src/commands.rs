//! CLI command implementations.

use std::fmt::Debug;

use bytemuck::Pod;
use glam::Vec3;
use zeta_containers::SetArray;
use zeta_mesh::generators::{octahedron, quad_grid, two_triangles};
use zeta_mesh::{TriMeshConnectionInfo, TriangleMesh};
use zeta_spatial::{HashGridConfig, PointsHashGrid};

/// How many leading sets `inspect` prints.
const PREVIEW_SETS: usize = 5;

fn load_mesh(path: &str) -> Result<TriangleMesh, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let mesh: TriangleMesh = serde_json::from_str(&content)?;
    mesh.validate()?;
    Ok(mesh)
}

/// Summarize a set-array file.
pub fn inspect(path: &str, kind: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Zeta Set-Array Inspector");
    println!("────────────────────────");
    println!();
    println!("File:         {path}");
    println!("Element type: {kind}");

    match kind {
        "int" => summarize::<i32>(path),
        "float" => summarize::<f32>(path),
        "double" => summarize::<f64>(path),
        "vector" => summarize::<Vec3>(path),
        other => {
            tracing::warn!(kind = other, "unknown set-array element type");
            eprintln!("Unknown element type: {other}");
            eprintln!("Available: int, float, double, vector");
            Err("Unknown element type".into())
        }
    }
}

fn summarize<T: Pod + Debug>(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let array = SetArray::<T>::from_file(path)?;

    println!("Sets:         {}", array.num_sets());
    println!("Elements:     {}", array.num_total_elements());
    println!("Longest set:  {}", array.max_count());
    println!();

    for (k, set) in array.iter().take(PREVIEW_SETS).enumerate() {
        println!("  [{k}] ({} items) {set:?}", set.len());
    }
    if array.num_sets() > PREVIEW_SETS {
        println!("  ... {} more", array.num_sets() - PREVIEW_SETS);
    }

    Ok(())
}

/// Compute all adjacency relations of a mesh and print a summary.
pub fn topology(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Zeta Mesh Topology");
    println!("──────────────────");
    println!();

    let mesh = load_mesh(path)?;
    let mut info = TriMeshConnectionInfo::new(&mesh);
    info.calculate_all();

    let max_valence = info.calculate_v2v().max_count();
    let max_fan = info.calculate_t2v().max_count();

    println!("Vertices:        {}", info.num_vertices());
    println!("Edges:           {}", info.num_edges());
    println!("Triangles:       {}", info.num_triangles());
    println!("Boundary edges:  {}", info.boundary_edge_count());
    println!("Max valence:     {max_valence}");
    println!("Max tri fan:     {max_fan}");
    println!("Closed:          {}", info.is_closed());
    println!("Manifold:        {}", info.is_manifold());

    Ok(())
}

/// Find mesh vertices strictly within `radius` of `point`.
pub fn query(
    path: &str,
    point: Vec3,
    radius: f32,
    config_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Zeta Neighbour Query");
    println!("────────────────────");
    println!();

    let config = match config_path {
        Some(p) => HashGridConfig::load(p)?,
        None => HashGridConfig::default(),
    };
    let mesh = load_mesh(path)?;
    let grid = PointsHashGrid::from_points(&mesh.positions_vec3(), &config);
    tracing::debug!(
        vertices = mesh.vertex_count(),
        items = grid.num_total_items(),
        "indexed mesh vertices"
    );

    println!("Grid:     {} buckets, voxel {}", grid.num_buckets(), grid.voxel_size());
    println!("Query:    {point} r={radius}");

    let mut found = Vec::new();
    let n = grid.find_points(&mut found, point, radius, true, false);
    println!("Found:    {n}");
    if !found.is_empty() {
        println!("Ids:      {found:?}");
    }
    if let Some((id, dist)) = grid.find_closest(point, radius) {
        println!("Closest:  {id} at {dist:.6}");
    }

    Ok(())
}

/// Validate a mesh or a hash grid config.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Zeta Validator");
    println!("──────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        match HashGridConfig::load(path) {
            Ok(config) => println!(
                "✅ Config is valid ({} buckets, voxel {}).",
                config.num_buckets, config.voxel_size
            ),
            Err(e) => println!("❌ Config validation failed: {e}"),
        }
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let content = std::fs::read_to_string(path)?;
        let mesh: TriangleMesh = serde_json::from_str(&content)?;
        match mesh.validate() {
            Ok(()) => println!(
                "✅ Mesh is valid ({} verts, {} tris).",
                mesh.vertex_count(),
                mesh.triangle_count()
            ),
            Err(e) => println!("❌ Mesh validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (mesh).");
    }

    Ok(())
}

/// Write a procedural mesh to `output` as JSON.
pub fn generate(kind: &str, output: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = match kind {
        "grid" => quad_grid(10, 10, 1.0, 1.0),
        "octahedron" => octahedron(1.0),
        "two-triangles" => two_triangles(),
        other => {
            tracing::warn!(kind = other, "unknown procedural mesh");
            eprintln!("Unknown mesh: {other}");
            eprintln!("Available: grid, octahedron, two-triangles");
            return Err("Unknown mesh".into());
        }
    };

    std::fs::write(output, serde_json::to_string_pretty(&mesh)?)?;
    println!(
        "Wrote {kind} ({} verts, {} tris) to: {output}",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("zeta_cli_{}_{}", std::process::id(), name))
    }

    #[test]
    fn generate_rejects_unknown_mesh() {
        let path = temp_path("unknown.json");
        assert!(generate("torus", path.to_str().unwrap()).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn generated_mesh_feeds_topology_and_query() {
        let path = temp_path("octahedron.json");
        let path_str = path.to_str().unwrap();
        generate("octahedron", path_str).unwrap();

        let mesh = load_mesh(path_str).unwrap();
        assert_eq!(mesh.triangle_count(), 8);
        assert!(topology(path_str).is_ok());
        assert!(query(path_str, Vec3::X, 0.5, None).is_ok());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn inspect_rejects_unknown_element_type() {
        assert!(inspect("missing.bin", "quaternion").is_err());
    }
}
