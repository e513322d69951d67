/*!
 * Process Lifecycle Tests
 * Fork/exec/reap scenarios and priority management
 *
 * Every test forks or mutates process-wide scheduling state, so all are
 * serialized.
 */

use procctl::signals::{HandlerAction, SignalControl, SignalDispatch, SignalRegistration};
use procctl::{
    alarm, exec_replace, fork, get_priority, kill, set_priority, wait, wait_pid, DecodedStatus,
    ForkOutcome, PriorityTarget, ProcessError, ReapOutcome, Signal, WaitOptions,
};
use serial_test::serial;
use std::time::Duration;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fork a child that runs `child_body` and never returns into the test
/// harness.
fn fork_child<F: FnOnce()>(child_body: F) -> libc::pid_t {
    init_logging();
    match fork().expect("fork failed") {
        ForkOutcome::Parent(child) => child,
        ForkOutcome::Child => {
            child_body();
            unsafe { libc::_exit(0) }
        }
    }
}

fn reap_blocking(pid: libc::pid_t, options: WaitOptions) -> (libc::pid_t, procctl::WaitStatus) {
    match wait_pid(pid, options).expect("wait_pid failed") {
        ReapOutcome::Reaped { pid, status } => (pid, status),
        ReapOutcome::NoChildReady => panic!("blocking wait returned NoChildReady"),
    }
}

#[test]
#[serial]
fn exec_success_program_exits_zero() {
    let child = fork_child(|| {
        let _ = exec_replace("/bin/true", &["true"], &[]);
        unsafe { libc::_exit(127) }
    });

    let (reaped, status) = reap_blocking(child, WaitOptions::blocking());
    assert_eq!(reaped, child);
    assert_eq!(status.decode(), DecodedStatus::Exited(0));
}

#[test]
#[serial]
fn exec_missing_program_is_not_found() {
    let child = fork_child(|| {
        match exec_replace("/nonexistent/program", &[], &[]) {
            Err(ProcessError::NotFound(_)) => unsafe { libc::_exit(42) },
            _ => unsafe { libc::_exit(1) },
        }
    });

    let (_, status) = reap_blocking(child, WaitOptions::blocking());
    assert_eq!(status.decode(), DecodedStatus::Exited(42));
}

#[test]
#[serial]
fn child_exit_code_round_trips() {
    let child = fork_child(|| unsafe { libc::_exit(7) });

    let (_, status) = reap_blocking(child, WaitOptions::blocking());
    assert!(status.is_exited());
    assert_eq!(status.exit_code(), 7);
    assert_eq!(status.decode(), DecodedStatus::Exited(7));
}

#[test]
#[serial]
fn terminated_child_decodes_to_signal() {
    let child = fork_child(|| loop {
        unsafe { libc::pause() };
    });

    kill(child, Signal::SIGTERM).unwrap();
    let (reaped, status) = reap_blocking(child, WaitOptions::blocking());
    assert_eq!(reaped, child);
    assert!(status.is_signaled());
    assert_eq!(status.terminating_signal(), Signal::SIGTERM.number());
    assert_eq!(
        status.decode(),
        DecodedStatus::Signaled(Signal::SIGTERM.number())
    );
}

#[test]
#[serial]
fn stop_and_continue_are_observable() {
    let child = fork_child(|| loop {
        unsafe { libc::pause() };
    });

    kill(child, Signal::SIGSTOP).unwrap();
    let options = WaitOptions {
        no_hang: false,
        report_stopped: true,
        report_continued: false,
    };
    let (_, status) = reap_blocking(child, options);
    assert_eq!(
        status.decode(),
        DecodedStatus::Stopped(Signal::SIGSTOP.number())
    );

    kill(child, Signal::SIGCONT).unwrap();
    let options = WaitOptions {
        no_hang: false,
        report_stopped: false,
        report_continued: true,
    };
    let (_, status) = reap_blocking(child, options);
    assert_eq!(status.decode(), DecodedStatus::Continued);

    kill(child, Signal::SIGKILL).unwrap();
    let (_, status) = reap_blocking(child, WaitOptions::blocking());
    assert_eq!(
        status.decode(),
        DecodedStatus::Signaled(Signal::SIGKILL.number())
    );
}

#[test]
#[serial]
fn non_blocking_wait_distinguishes_no_child_ready() {
    let child = fork_child(|| {
        std::thread::sleep(Duration::from_secs(30));
    });

    // Child is alive: not ready is a defined outcome, not an error
    assert_eq!(
        wait_pid(child, WaitOptions::non_blocking()).unwrap(),
        ReapOutcome::NoChildReady
    );

    kill(child, Signal::SIGKILL).unwrap();
    let (reaped, status) = reap_blocking(child, WaitOptions::blocking());
    assert_eq!(reaped, child);
    assert!(status.is_signaled());
}

#[test]
#[serial]
fn interrupted_blocking_wait_is_distinguished() {
    let child = fork_child(|| loop {
        unsafe { libc::pause() };
    });

    // A trap without SA_RESTART makes the blocking reap take EINTR
    let control = SignalControl::new();
    control
        .register(Signal::SIGALRM, HandlerAction::invoke(|_| {}), false)
        .unwrap();

    alarm(1);
    assert_eq!(
        wait_pid(child, WaitOptions::blocking()).unwrap_err(),
        ProcessError::Interrupted
    );

    alarm(0);
    control.dispatch_pending().unwrap();
    control.reset(Signal::SIGALRM).unwrap();

    kill(child, Signal::SIGKILL).unwrap();
    let (reaped, _) = reap_blocking(child, WaitOptions::blocking());
    assert_eq!(reaped, child);
}

#[test]
#[serial]
fn wait_with_no_children_is_an_error() {
    // All children of this serialized test binary have been reaped
    assert_eq!(
        wait(WaitOptions::non_blocking()).unwrap_err(),
        ProcessError::NoChildren
    );
}

#[test]
#[serial]
fn kill_unknown_pid_is_no_such_process() {
    // Largest possible PID is extremely unlikely to exist
    let err = kill(libc::pid_t::MAX - 1, Signal::SIGTERM).unwrap_err();
    assert!(matches!(err, ProcessError::NoSuchProcess(_)));
}

#[test]
#[serial]
fn priority_get_set_round_trip() {
    let current = get_priority(PriorityTarget::Process, None).unwrap();
    assert!((-20..=19).contains(&current));

    // Unprivileged processes may only lower their scheduling favor
    let target = (current + 1).min(19);
    if target == current {
        return;
    }

    set_priority(PriorityTarget::Process, None, target).unwrap();
    assert_eq!(get_priority(PriorityTarget::Process, None).unwrap(), target);
}
