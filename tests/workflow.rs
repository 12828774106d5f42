#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use rebar_adjust::config::GapParameters;
use rebar_adjust::geometry::{Aabb, BarGeometry, Polygon, Segment};
use rebar_adjust::host::{MemoryModel, ModelStore};
use rebar_adjust::index::{ObjectId, SkipReason};
use rebar_adjust::math::Point3;
use rebar_adjust::operations::attach::{AttachCollinear, Candidate};
use rebar_adjust::session::AdjustSession;

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("rebar_adjust=debug".parse().unwrap_or_default());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

#[test]
fn gap_then_merge_round_trip() {
    init_tracing();
    let mut model = MemoryModel::new();
    let left = model.add_bar(BarGeometry::straight(p(0.0, 0.0, 500.0), p(980.0, 0.0, 500.0)));
    let right = model.add_bar(BarGeometry::Group(vec![
        Polygon::new(vec![p(1010.0, 0.0, 500.0), p(2000.0, 0.0, 500.0)]),
        Polygon::new(vec![p(1010.0, 200.0, 500.0), p(2000.0, 200.0, 500.0)]),
    ]));
    let broken = model.add_bar(BarGeometry::Single(Polygon::new(vec![p(5.0, 5.0, 5.0)])));

    let params = GapParameters::from_text("30", "50").unwrap();
    let mut session = AdjustSession::new(params).unwrap();
    let extracted = session.select_bars(&model, &[left, right, broken]);
    assert_eq!(extracted.indexed, vec![left, right]);
    assert_eq!(extracted.skipped[0].reason, SkipReason::TooFewPoints);

    let ranked = session.pick_target(p(1000.0, 0.0, 500.0));
    assert_eq!(ranked[0].id, right);

    let outcome = session.adjust(&mut model).unwrap();
    assert!(outcome.gap.failures.is_empty());
    assert!(outcome.stubs.is_none());

    let l = model.geometry(left).unwrap().endpoints().unwrap();
    let r = model.geometry(right).unwrap().endpoints().unwrap();
    assert_relative_eq!(l.end, p(985.0, 0.0, 500.0), epsilon = 1e-9);
    assert_relative_eq!(r.start, p(1015.0, 0.0, 500.0), epsilon = 1e-9);
    assert!(((r.start - l.end).norm() - 30.0).abs() < 1e-6);

    // Closing the gap again then merging yields one bar over the full run.
    session
        .set_parameters(GapParameters::from_text("0", "50").unwrap())
        .unwrap();
    session.adjust(&mut model).unwrap();
    let merged = session.merge(&mut model).unwrap();

    assert_eq!(merged.kept, right);
    assert!(model.geometry(left).is_none());
    assert_eq!(
        merged.span,
        Segment::new(p(0.0, 0.0, 500.0), p(2000.0, 0.0, 500.0))
    );
    assert_eq!(session.index().len(), 1);
}

#[test]
fn collinear_beam_segments_join_assembly() {
    init_tracing();
    let mut model = MemoryModel::new();
    let reference = model.add_bar(BarGeometry::straight(p(0.0, 0.0, 0.0), p(0.0, 0.0, 3000.0)));
    let column = model.add_part(Aabb::new(p(-200.0, -200.0, 0.0), p(200.0, 200.0, 3000.0)));
    let assembly = model.add_assembly();

    let reference_span = model.geometry(reference).unwrap().endpoints().unwrap();
    let candidates = vec![
        Candidate::beam_segment(
            ObjectId(50),
            Segment::new(p(30.0, 0.0, 100.0), p(30.0, 0.0, 900.0)),
            "FL50*8",
            Some(p(30.0, 0.0, 100.0)),
        ),
        Candidate::beam_segment(
            ObjectId(51),
            Segment::new(p(400.0, 0.0, 100.0), p(400.0, 0.0, 900.0)),
            "FL50*8",
            Some(p(400.0, 0.0, 100.0)),
        ),
    ];

    let report = AttachCollinear::new(reference, reference_span, column, assembly, 50.0)
        .execute(&candidates, &mut model)
        .unwrap();

    assert_eq!(report.collinear.len(), 1);
    assert_eq!(report.attached.len(), 1);
    assert_eq!(model.members(assembly).unwrap().len(), 1);
    assert!(report.to_string().contains("attached beam segments: 1"));
}
