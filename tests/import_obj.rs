//! End-to-end import scenarios against real files on disk.

use std::fs;
use std::path::PathBuf;

use meshview::{
    import_obj, Error, IdComponent, MaterialComponent, MeshComponent, Scene, TagComponent,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a scratch directory unique to this test binary invocation.
fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("meshview-{label}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const CUBE_OBJ: &str = "\
# unit cube, 8 vertices, 12 triangles
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
f 1 2 3
f 1 3 4
f 5 7 6
f 5 8 7
f 1 6 2
f 1 5 6
f 2 7 3
f 2 6 7
f 3 8 4
f 3 7 8
f 4 5 1
f 4 8 5
";

#[test]
fn unit_cube_imports_to_a_single_entity() {
    init_logging();
    let dir = scratch_dir("cube");
    let path = dir.join("cube.obj");
    fs::write(&path, CUBE_OBJ).unwrap();

    let mut scene = Scene::new();
    let entities = import_obj(&mut scene, &path).unwrap();

    assert_eq!(entities.len(), 1);
    assert_eq!(scene.entity_count(), 1);

    let mesh = &scene
        .get_component::<MeshComponent>(entities[0])
        .unwrap()
        .mesh;
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.index_count(), 36);
    assert_eq!(mesh.triangle_count(), 12);
    // 8 records interleave to 8 * (3 + 3) floats.
    assert_eq!(mesh.interleaved().len(), 48);

    // The model was normalized into a unit box around the origin.
    let bounds = mesh.bounds();
    assert!((bounds.largest_extent() - 1.0).abs() < 1e-5);
    assert!(bounds.center().x.abs() < 1e-5);
    assert!(bounds.center().y.abs() < 1e-5);
    assert!(bounds.center().z.abs() < 1e-5);

    // Every synthesized normal is unit length.
    for record in mesh.vertices() {
        let length_sq = record.normal.x * record.normal.x
            + record.normal.y * record.normal.y
            + record.normal.z * record.normal.z;
        assert!((length_sq - 1.0).abs() < 1e-4);
    }

    // No o/g marker and no material: defaults all the way down.
    assert_eq!(
        scene
            .get_component::<TagComponent>(entities[0])
            .unwrap()
            .tag,
        "Unnamed Entity"
    );
    assert_eq!(
        scene
            .get_component::<MaterialComponent>(entities[0])
            .unwrap()
            .name,
        "Unnamed Mesh"
    );
}

#[test]
fn quad_fans_but_keeps_all_four_positions() {
    init_logging();
    let dir = scratch_dir("quad");
    let path = dir.join("quad.obj");
    fs::write(
        &path,
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
    )
    .unwrap();

    let mut scene = Scene::new();
    let entities = import_obj(&mut scene, &path).unwrap();
    let mesh = &scene
        .get_component::<MeshComponent>(entities[0])
        .unwrap()
        .mesh;

    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
}

#[test]
fn missing_material_library_does_not_block_the_import() {
    init_logging();
    let dir = scratch_dir("missing-mtl");
    let path = dir.join("model.obj");
    fs::write(
        &path,
        "mtllib missing.mtl\nusemtl ghost\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
    )
    .unwrap();

    let mut scene = Scene::new();
    let entities = import_obj(&mut scene, &path).unwrap();

    // The unresolved material name degrades to the default material.
    let material = scene
        .get_component::<MaterialComponent>(entities[0])
        .unwrap();
    assert_eq!(material.name, "Unnamed Mesh");
    assert_eq!(material.color.x, 0.7);
}

#[test]
fn materials_resolve_per_group_from_the_library() {
    init_logging();
    let dir = scratch_dir("mtl");
    fs::write(
        dir.join("colors.mtl"),
        "newmtl red\nKd 1.0 0.0 0.0\nnewmtl blue\nKd 0.0 0.0 1.0\n",
    )
    .unwrap();
    let path = dir.join("two_groups.obj");
    fs::write(
        &path,
        "mtllib colors.mtl\n\
         v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\n\
         o left\nusemtl red\nf 1 2 3\n\
         o right\nusemtl blue\nf 1 2 4\n",
    )
    .unwrap();

    let mut scene = Scene::new();
    let entities = import_obj(&mut scene, &path).unwrap();
    assert_eq!(entities.len(), 2);

    let left = scene
        .get_component::<MaterialComponent>(entities[0])
        .unwrap();
    assert_eq!(left.name, "red");
    assert_eq!(left.color.x, 1.0);

    let right = scene
        .get_component::<MaterialComponent>(entities[1])
        .unwrap();
    assert_eq!(right.name, "blue");
    assert_eq!(right.color.z, 1.0);

    assert_eq!(
        scene.get_component::<TagComponent>(entities[0]).unwrap().tag,
        "left"
    );
}

#[test]
fn all_entities_of_one_import_share_a_group() {
    init_logging();
    let dir = scratch_dir("groups");
    let path = dir.join("pair.obj");
    fs::write(
        &path,
        "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
         o a\nf 1 2 3\n\
         o b\nf 3 2 1\n",
    )
    .unwrap();

    let mut scene = Scene::new();
    let first_batch = import_obj(&mut scene, &path).unwrap();
    let second_batch = import_obj(&mut scene, &path).unwrap();

    let group_of = |scene: &Scene, entity| {
        scene
            .get_component::<IdComponent>(entity)
            .unwrap()
            .group()
    };

    let group_a = group_of(&scene, first_batch[0]);
    assert!(!group_a.is_nil());
    assert_eq!(group_a, group_of(&scene, first_batch[1]));

    // A second import gets its own group identifier.
    assert_ne!(group_a, group_of(&scene, second_batch[0]));
}

#[test]
fn failed_import_leaves_the_scene_untouched() {
    init_logging();
    let dir = scratch_dir("failed");
    let path = dir.join("broken.obj");
    fs::write(&path, "v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap();

    let mut scene = Scene::new();
    scene.create_entity("survivor");

    let result = import_obj(&mut scene, &path);
    assert!(matches!(result, Err(Error::MalformedFace { .. })));
    assert_eq!(scene.entity_count(), 1);
}

#[test]
fn unreadable_geometry_file_is_fatal_to_the_import() {
    init_logging();
    let mut scene = Scene::new();
    let result = import_obj(&mut scene, "nowhere/to/be/found.obj");
    assert!(matches!(result, Err(Error::FileUnreadable { .. })));
    assert_eq!(scene.entity_count(), 0);
}
