// tests/reactor_manual_timer.rs

//! Async shell driven by the manually-fired timer backend and a recording
//! sink. Events flow through the real mpsc channel and reactor loop; the
//! test fires ticks itself and synchronises on the recorded counts.

use std::error::Error;

use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use holdgate::engage::{
    CoreReactor, EngagementId, Reactor, ReactorEvent, ReactorHandle, ReactorOptions,
};
use holdgate::signal::Signal;

use holdgate_test_utils::init_tracing;
use holdgate_test_utils::manual_timer::{ManualTimerBackend, ManualTimerHandle};
use holdgate_test_utils::recording_sink::{RecordingHandle, RecordingSink};
use holdgate_test_utils::wait_for;

type TestResult = Result<(), Box<dyn Error>>;

struct Fixture {
    handle: ReactorHandle,
    timer: ManualTimerHandle,
    recording: RecordingHandle,
    join: tokio::task::JoinHandle<holdgate::errors::Result<()>>,
}

fn spawn_fixture() -> Fixture {
    let (event_tx, event_rx) = mpsc::channel::<ReactorEvent>(64);

    let timers = ManualTimerBackend::new(event_tx.clone());
    let timer = timers.handle();

    let sink = RecordingSink::new();
    let recording = sink.handle();

    let core = CoreReactor::new(ReactorOptions::default());
    let reactor = Reactor::new(core, event_rx, timers, sink);
    let join = tokio::spawn(reactor.run());

    Fixture {
        handle: ReactorHandle::new(event_tx),
        timer,
        recording,
        join,
    }
}

async fn shutdown(fixture: Fixture) -> TestResult {
    fixture.handle.shutdown().await?;
    timeout(Duration::from_secs(3), fixture.join).await???;
    Ok(())
}

#[tokio::test]
async fn single_signal_produces_no_notifications() -> TestResult {
    init_tracing();
    let fixture = spawn_fixture();

    fixture.handle.begin(Signal::Primary).await?;
    fixture.handle.end(Signal::Primary).await?;

    let recording = fixture.recording.clone();
    let timer = fixture.timer.clone();
    shutdown(fixture).await?;

    assert_eq!(recording.starts(), 0);
    assert_eq!(recording.ticks(), 0);
    assert_eq!(recording.completions(), 0);
    assert_eq!(timer.created(), 0);
    Ok(())
}

#[tokio::test]
async fn full_engagement_cycle_with_re_engagement() -> TestResult {
    init_tracing();
    let fixture = spawn_fixture();

    // First engagement: two ticks, then early release.
    fixture.handle.begin(Signal::Primary).await?;
    fixture.handle.begin(Signal::Secondary).await?;
    {
        let recording = fixture.recording.clone();
        wait_for(move || recording.starts() == 1).await;
    }
    assert_eq!(fixture.timer.created(), 1);

    fixture.timer.fire_tick().await?;
    fixture.timer.fire_tick().await?;
    fixture.handle.end(Signal::Secondary).await?;
    {
        let recording = fixture.recording.clone();
        wait_for(move || recording.completions() == 1).await;
    }
    assert_eq!(fixture.recording.tick_indices(), vec![0, 1]);
    assert_eq!(fixture.timer.stopped(), 1);

    // Second engagement: runs to budget exhaustion.
    fixture.handle.begin(Signal::Secondary).await?;
    {
        let timer = fixture.timer.clone();
        wait_for(move || timer.created() == 2).await;
    }
    for _ in 0..4 {
        fixture.timer.fire_tick().await?;
    }
    {
        let recording = fixture.recording.clone();
        wait_for(move || recording.completions() == 2).await;
    }

    let snapshot = fixture.recording.snapshot();
    assert_eq!(snapshot.starts, 2);
    assert_eq!(snapshot.completions, 2);
    assert_eq!(snapshot.tick_indices, vec![0, 1, 0, 1, 2]);
    assert_eq!(fixture.timer.stopped(), 2);
    assert!(!fixture.timer.is_running());

    shutdown(fixture).await
}

#[tokio::test]
async fn stale_tick_is_ignored_by_a_newer_engagement() -> TestResult {
    init_tracing();
    let fixture = spawn_fixture();

    fixture.handle.begin(Signal::Primary).await?;
    fixture.handle.begin(Signal::Secondary).await?;
    fixture.handle.end(Signal::Secondary).await?;
    fixture.handle.begin(Signal::Secondary).await?;
    {
        let recording = fixture.recording.clone();
        wait_for(move || recording.starts() == 2).await;
    }

    // A straggling tick from the first engagement's disposed timer.
    fixture.timer.fire_tick_as(EngagementId(1)).await?;
    // A genuine tick of the current engagement.
    fixture.timer.fire_tick().await?;
    {
        let recording = fixture.recording.clone();
        wait_for(move || recording.ticks() == 1).await;
    }

    assert_eq!(fixture.recording.tick_indices(), vec![0]);
    shutdown(fixture).await
}
