//! End-to-end click flows driven through the public API with an in-memory
//! renderer and a scripted backend.

use std::cell::RefCell;

use async_trait::async_trait;
use futures::executor::block_on;

use route_markers::controller::{MarkerController, Phase};
use route_markers::coords::{PixelPoint, SurfaceBounds};
use route_markers::persist::{PersistError, Persistence};
use route_markers::point::{Point, SaveAck, SavePayload, parse_feed};
use route_markers::render::RecordingRenderer;

/// Backend double: records bodies, answers from a script, fails when exhausted.
struct FakeBackend {
    received: RefCell<Vec<SavePayload>>,
    answers: RefCell<Vec<Result<SaveAck, PersistError>>>,
}

impl FakeBackend {
    fn new(mut answers: Vec<Result<SaveAck, PersistError>>) -> Self {
        answers.reverse();
        Self { received: RefCell::new(Vec::new()), answers: RefCell::new(answers) }
    }
}

#[async_trait(?Send)]
impl Persistence for FakeBackend {
    async fn save(&self, payload: SavePayload) -> Result<SaveAck, PersistError> {
        self.received.borrow_mut().push(payload);
        self.answers
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(PersistError::Transport("connection refused".into())))
    }
}

fn page() -> SurfaceBounds {
    SurfaceBounds::new(0.0, 0.0, 500.0, 300.0)
}

#[test]
fn load_then_click_then_save() {
    let backend = FakeBackend::new(vec![Ok(SaveAck { success: true, point_id: Some(3) })]);
    let mut ctl = MarkerController::new(RecordingRenderer::new());

    let feed = parse_feed(r#"[{"id":1,"x":0,"y":0},{"id":2,"x":1000,"y":1000}]"#).expect("valid feed");
    ctl.initialize(feed, &page()).expect("surface is laid out");

    let req = ctl.handle_click(PixelPoint::new(250.0, 150.0), &page()).expect("inside");
    let outcome = block_on(backend.save(req.payload));
    ctl.complete(req.ticket, outcome);

    assert_eq!(
        ctl.renderer().placed(),
        &[PixelPoint::new(0.0, 0.0), PixelPoint::new(500.0, 300.0), PixelPoint::new(250.0, 150.0)]
    );
    assert_eq!(*backend.received.borrow(), vec![SavePayload { x: 500, y: 500 }]);
    assert_eq!(ctl.points()[2], Point { id: Some(3), x: 500, y: 500 });
    assert_eq!(ctl.phase(), Phase::Idle);
}

#[test]
fn outside_click_never_reaches_backend() {
    let backend = FakeBackend::new(Vec::new());
    let mut ctl = MarkerController::new(RecordingRenderer::new());

    if let Some(req) = ctl.handle_click(PixelPoint::new(600.0, 150.0), &page()) {
        ctl.complete(req.ticket, block_on(backend.save(req.payload)));
    }

    assert!(backend.received.borrow().is_empty());
    assert!(ctl.renderer().placed().is_empty());
}

#[test]
fn backend_failure_keeps_optimistic_marker() {
    let backend = FakeBackend::new(Vec::new());
    let mut ctl = MarkerController::new(RecordingRenderer::new());

    let req = ctl.handle_click(PixelPoint::new(100.0, 100.0), &page()).expect("inside");
    let outcome = block_on(backend.save(req.payload));
    assert!(matches!(outcome, Err(PersistError::Transport(_))));
    ctl.complete(req.ticket, outcome);

    assert_eq!(ctl.renderer().placed().len(), 1);
    assert_eq!(ctl.points()[0].id, None);
    assert_eq!(ctl.phase(), Phase::Idle);
}

#[test]
fn stored_points_follow_a_resized_image() {
    let mut small = MarkerController::new(RecordingRenderer::new());
    let req = small.handle_click(PixelPoint::new(125.0, 75.0), &page()).expect("inside");

    let stored = vec![Point { id: Some(1), x: req.payload.x, y: req.payload.y }];
    let mut large = MarkerController::new(RecordingRenderer::new());
    large.initialize(stored, &SurfaceBounds::new(40.0, 40.0, 1000.0, 600.0)).expect("surface is laid out");

    assert_eq!(large.renderer().placed(), &[PixelPoint::new(250.0, 150.0)]);
}
