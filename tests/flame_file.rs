//! End-to-end: TOML flame file -> genome -> render.

use flamecore::config::ConfigManager;
use flamecore::engine::{render, CollectSink};

const FLAME: &str = r#"
[run]
particles = 4
steps_per_particle = 250
seed = 1234
limit = 1000.0

[genome]
trig_scaled = false
symmetry = 0

xform.count = 3

xform.0.weight = 1.0
xform.0.color = 0.0
xform.0.color_speed = 0.5
xform.0.coefs.a = 0.5
xform.0.coefs.b = 0.0
xform.0.coefs.c = -0.25
xform.0.coefs.d = 0.0
xform.0.coefs.e = 0.5
xform.0.coefs.f = 0.0
xform.0.var.0.type = 0
xform.0.var.0.weight = 1.0

xform.1.weight = 1.0
xform.1.color = 0.5
xform.1.color_speed = 0.5
xform.1.pre_blur = 0.1
xform.1.var.0.type = 2
xform.1.var.0.weight = 0.7
xform.1.var.1.type = 3
xform.1.var.1.weight = 0.3

xform.2.weight = 0.5
xform.2.color = 1.0
xform.2.color_speed = 0.5
xform.2.var.0.type = 24
xform.2.var.0.p0 = 1.0
xform.2.var.0.p1 = 0.5
xform.2.var.0.p2 = -0.3
xform.2.var.0.p3 = 0.8

final.enabled = true
final.color = 0.5
final.color_speed = 0.1
final.var.0.type = 0
"#;

fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("flame-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn flame_file_round_trip_renders() {
    let path = write_temp("round-trip", FLAME);
    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let config = manager.get();
    assert_eq!(config.run.particles, 4);
    assert_eq!(config.run.seed, Some(1234));

    let genome = manager.build_genome().unwrap();
    assert_eq!(genome.xform_count(), 3);
    assert!(genome.final_xform.is_some());
    assert_eq!(genome.xforms[1].pre_blur, 0.1);
    assert_eq!(genome.xforms[2].slots[0].params.len(), 4);

    let sink = CollectSink::new();
    let stats = render(&genome, &config.run, &sink);
    assert_eq!(stats.emitted + stats.discarded, 1000);
    assert!(stats.emitted > 0);

    // colors stay inside the palette range under EMA blending
    for point in sink.into_points() {
        assert!((0.0..=1.0).contains(&point.color));
    }
}

#[test]
fn malformed_flame_file_is_rejected_up_front() {
    let path = write_temp("malformed", "[run]\nparticles = 0\n");
    let manager = ConfigManager::new();
    assert!(manager.load_from_file(&path).is_err());
    std::fs::remove_file(&path).ok();
}

#[test]
fn genome_errors_surface_at_build_time() {
    // reserved pre-blur code 65 as a slot type
    let path = write_temp(
        "reserved-code",
        "[genome]\nxform.count = 1\nxform.0.var.0.type = 65\n",
    );
    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(manager.build_genome().is_err());
}
