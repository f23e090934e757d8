use logtint_runtime::{Cmd, Model, Program};

struct TestModel {
    executed_after_quit: bool,
}

#[derive(Debug)]
enum TestMsg {
    QuitInBatch,
    DeferThenQuit,
    SetExecuted,
}

impl Model for TestModel {
    type Message = TestMsg;

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        match msg {
            TestMsg::QuitInBatch => Cmd::Batch(vec![
                Cmd::Quit,
                Cmd::Msg(TestMsg::SetExecuted), // Should NOT be executed
            ]),
            TestMsg::DeferThenQuit => {
                Cmd::Batch(vec![Cmd::Defer(TestMsg::SetExecuted), Cmd::Quit])
            }
            TestMsg::SetExecuted => {
                self.executed_after_quit = true;
                Cmd::None
            }
        }
    }
}

#[test]
fn batch_stops_after_quit() {
    let mut program = Program::new(TestModel {
        executed_after_quit: false,
    });
    program.init();

    program.send(TestMsg::QuitInBatch);
    program.run_until_idle();

    assert!(
        !program.model().executed_after_quit,
        "Commands after Quit in Batch should not be executed"
    );
    assert!(!program.is_running(), "Program should have stopped");
}

#[test]
fn quit_discards_already_deferred_messages() {
    let mut program = Program::new(TestModel {
        executed_after_quit: false,
    });
    program.send(TestMsg::DeferThenQuit);

    assert_eq!(program.run_until_idle(), 1);
    assert_eq!(program.pending(), 0);
    assert!(!program.model().executed_after_quit);
    assert_eq!(program.stats().deferred, 1);
}
