use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use timeline_actor::{reply, ActorState, FrameActor, FrameworkError, Response, Tween};
use tokio::time::Instant;

// --- Test State ---

/// A single fader driven by frames.
struct Fader {
    value: f32,
    tween: Option<Tween>,
    duration: Duration,
    shut_down: Arc<AtomicBool>,
}

#[derive(Debug)]
enum FaderRequest {
    FadeTo {
        target: f32,
        respond_to: Response<()>,
    },
    Read {
        respond_to: Response<f32>,
    },
    Fail {
        respond_to: Response<()>,
    },
}

impl ActorState for Fader {
    type Request = FaderRequest;
    type Context = ();

    fn handle(&mut self, request: FaderRequest, _ctx: &(), now: Instant) {
        match request {
            FaderRequest::FadeTo { target, respond_to } => {
                if let Some(tween) = self.tween.take() {
                    self.value = tween.settle();
                }
                self.tween = Some(Tween::new(self.value, target, now, self.duration));
                reply(respond_to, Ok(()));
            }
            FaderRequest::Read { respond_to } => reply(respond_to, Ok(self.value)),
            FaderRequest::Fail { respond_to } => {
                reply(respond_to, Err(FrameworkError::NotFound("fader".into())))
            }
        }
    }

    fn on_frame(&mut self, now: Instant) {
        if let Some(tween) = self.tween {
            self.value = tween.value_at(now);
            if tween.is_finished(now) {
                self.tween = None;
            }
        }
    }

    fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    fn on_shutdown(&mut self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }
}

fn fader(shut_down: Arc<AtomicBool>) -> Fader {
    Fader {
        value: 0.0,
        tween: None,
        duration: Duration::from_millis(200),
        shut_down,
    }
}

#[tokio::test(start_paused = true)]
async fn test_frames_drive_animation_to_completion() {
    let flag = Arc::new(AtomicBool::new(false));
    let (actor, client) = FrameActor::new(fader(flag.clone()), 8, Duration::from_millis(16));
    let handle = tokio::spawn(actor.run(()));

    client
        .request(|respond_to| FaderRequest::FadeTo {
            target: 1.0,
            respond_to,
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    let mid = client
        .request(|respond_to| FaderRequest::Read { respond_to })
        .await
        .unwrap();
    assert!(mid > 0.0 && mid < 1.0, "expected mid-animation value, got {mid}");

    tokio::time::sleep(Duration::from_millis(250)).await;
    let done = client
        .request(|respond_to| FaderRequest::Read { respond_to })
        .await
        .unwrap();
    assert_eq!(done, 1.0);

    drop(client);
    handle.await.unwrap();
    assert!(flag.load(Ordering::SeqCst), "on_shutdown should run");
}

#[tokio::test(start_paused = true)]
async fn test_retarget_settles_previous_tween() {
    let flag = Arc::new(AtomicBool::new(false));
    let (actor, client) = FrameActor::new(fader(flag), 8, Duration::from_millis(16));
    tokio::spawn(actor.run(()));

    client
        .request(|respond_to| FaderRequest::FadeTo {
            target: 1.0,
            respond_to,
        })
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Interrupt: the first fade is settled at 1.0 before fading back down.
    client
        .request(|respond_to| FaderRequest::FadeTo {
            target: 0.0,
            respond_to,
        })
        .await
        .unwrap();
    let start = client
        .request(|respond_to| FaderRequest::Read { respond_to })
        .await
        .unwrap();
    assert_eq!(start, 1.0);

    tokio::time::sleep(Duration::from_millis(300)).await;
    let end = client
        .request(|respond_to| FaderRequest::Read { respond_to })
        .await
        .unwrap();
    assert_eq!(end, 0.0);
}

#[tokio::test]
async fn test_errors_are_returned_to_caller() {
    let flag = Arc::new(AtomicBool::new(false));
    let (actor, client) = FrameActor::new(fader(flag), 8, Duration::from_millis(16));
    tokio::spawn(actor.run(()));

    let result = client
        .request(|respond_to| FaderRequest::Fail { respond_to })
        .await;
    assert!(matches!(result, Err(FrameworkError::NotFound(_))));
}
