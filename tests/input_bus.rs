//! Fan-out and shutdown behaviour of the input bus seen from listener threads.

mod support;

use std::sync::mpsc;
use std::sync::Arc;

use portchat::context::AppContext;
use portchat::error::InputError;
use portchat::input::{InputBus, KeyEvent, KeyListener, LineInput, LineListener, RawKeyListener};
use support::{eventually, Pending};

fn new_bus() -> (Arc<AppContext>, Arc<InputBus>) {
    let ctx = Arc::new(AppContext::new(10));
    let bus = InputBus::new(Arc::clone(&ctx));
    (ctx, bus)
}

#[test]
fn end_of_stream_releases_every_waiter() {
    let (ctx, bus) = new_bus();
    let listeners: Vec<Arc<RawKeyListener>> = vec![
        Arc::new(RawKeyListener::all()),
        Arc::new(RawKeyListener::arrows_only()),
        Arc::new(RawKeyListener::non_character()),
    ];
    for listener in &listeners {
        bus.register(listener.clone());
    }
    let waiters: Vec<_> = listeners
        .iter()
        .map(|listener| {
            let listener = Arc::clone(listener);
            Pending::spawn("raw-waiter", move || listener.wait_next())
        })
        .collect();
    assert!(waiters.iter().all(Pending::is_pending));

    let (tx, rx) = mpsc::channel::<KeyEvent>();
    let reader = bus.spawn(rx).expect("spawn bus");
    drop(tx);
    reader.join().expect("join bus");

    for waiter in waiters {
        assert_eq!(waiter.finish(), KeyEvent::EndOfStream);
    }
    assert!(ctx.is_shutdown());
    assert_eq!(bus.listener_count(), 0);

    let late = Arc::new(LineListener::new());
    bus.register(late.clone());
    assert!(late.is_closed());
    assert_eq!(late.read_line(), Err(InputError::StreamClosed));
    assert_eq!(bus.listener_count(), 0);
}

#[test]
fn unregister_releases_a_blocked_reader() {
    let (_ctx, bus) = new_bus();
    let line = Arc::new(LineListener::new());
    let other = Arc::new(RawKeyListener::all());
    bus.register(line.clone());
    bus.register(other.clone());

    let reader = {
        let line = Arc::clone(&line);
        Pending::spawn("line-reader", move || line.read_line())
    };
    assert!(reader.is_pending());

    assert!(bus.unregister(&line));
    assert_eq!(reader.finish(), Err(InputError::StreamClosed));
    assert_eq!(bus.listener_count(), 1);
    assert!(!other.is_closed());
}

#[test]
fn filtered_listener_wakes_only_for_matching_keys() {
    let (_ctx, bus) = new_bus();
    let arrows = Arc::new(RawKeyListener::arrows_only());
    let everything = Arc::new(RawKeyListener::all());
    bus.register(arrows.clone());
    bus.register(everything.clone());

    let waiter = {
        let arrows = Arc::clone(&arrows);
        Pending::spawn("arrow-waiter", move || arrows.wait_next())
    };

    let (tx, rx) = mpsc::channel();
    let reader = bus.spawn(rx).expect("spawn bus");
    tx.send(KeyEvent::Character('x')).expect("send");
    tx.send(KeyEvent::Enter).expect("send");
    eventually("the unfiltered listener to see Enter", || {
        everything.wait_next() == KeyEvent::Enter
    });
    assert!(waiter.is_pending());

    tx.send(KeyEvent::ArrowUp).expect("send");
    assert_eq!(waiter.finish(), KeyEvent::ArrowUp);

    drop(tx);
    reader.join().expect("join bus");
}

#[test]
fn line_submitted_before_the_read_is_kept() {
    let (_ctx, bus) = new_bus();
    let line = Arc::new(LineListener::new());
    let raw = Arc::new(RawKeyListener::non_character());
    bus.register(line.clone());
    bus.register(raw.clone());

    let (tx, rx) = mpsc::channel();
    let reader = bus.spawn(rx).expect("spawn bus");
    for key in [KeyEvent::Character('o'), KeyEvent::Character('k'), KeyEvent::Enter] {
        tx.send(key).expect("send");
    }
    // The raw listener sits behind the line listener, so Enter has been applied.
    assert_eq!(raw.wait_next(), KeyEvent::Enter);
    assert_eq!(line.read_line(), Ok("ok".to_string()));

    drop(tx);
    reader.join().expect("join bus");
    assert_eq!(line.read_line(), Err(InputError::StreamClosed));
}
