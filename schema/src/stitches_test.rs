use super::*;

fn full(x: f32, y: f32) -> FullStitch {
    FullStitch { x, y, palindex: 1, kind: FullStitchKind::Full }
}

fn node(x: f32, y: f32) -> NodeStitch {
    NodeStitch { x, y, rotated: false, palindex: 4, kind: NodeStitchKind::FrenchKnot }
}

#[test]
fn line_endpoints_pair_x_and_y_tuples() {
    let line = LineStitch { x: (1.0, 3.0), y: (2.0, 4.0), palindex: 0, kind: LineStitchKind::Back };
    assert_eq!(line.start(), (1.0, 2.0));
    assert_eq!(line.end(), (3.0, 4.0));
}

#[test]
fn stitch_palindex_reads_through_every_variant() {
    let part = PartStitch {
        x: 0.0,
        y: 0.0,
        palindex: 2,
        direction: PartStitchDirection::Forward,
        kind: PartStitchKind::Half,
    };
    let line = LineStitch { x: (0.0, 1.0), y: (0.0, 0.0), palindex: 3, kind: LineStitchKind::Straight };
    assert_eq!(Stitch::from(full(0.0, 0.0)).palindex(), 1);
    assert_eq!(Stitch::from(part).palindex(), 2);
    assert_eq!(Stitch::from(line).palindex(), 3);
    assert_eq!(Stitch::from(node(0.5, 0.5)).palindex(), 4);
}

#[test]
fn empty_bundle() {
    let bundle = StitchBundle::default();
    assert!(bundle.is_empty());
    assert_eq!(bundle.len(), 0);
    assert_eq!(bundle.iter().count(), 0);
}

#[test]
fn bundle_iterates_full_stitches_first() {
    let bundle = StitchBundle {
        fullstitches: vec![full(1.0, 1.0), full(2.0, 1.0)],
        nodes: vec![node(3.5, 3.5)],
        ..Default::default()
    };
    assert_eq!(bundle.len(), 3);
    let order: Vec<Stitch> = bundle.iter().collect();
    assert_eq!(order[0], Stitch::Full(full(1.0, 1.0)));
    assert_eq!(order[1], Stitch::Full(full(2.0, 1.0)));
    assert_eq!(order[2], Stitch::Node(node(3.5, 3.5)));
}
