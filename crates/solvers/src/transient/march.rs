use swing_core::{Model, Observer, Snapshot};

use super::{Action, Error, Event, Solution, Status};

/// Runs the fixed-step marching loop shared by the transient solvers.
///
/// `advance` maps the current snapshot to the next model input; everything
/// else (initial evaluation, history, events, early stop) lives here.
pub(crate) fn march<M, Obs, F>(
    model: &M,
    initial: M::Input,
    steps: usize,
    mut observer: Obs,
    mut advance: F,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
    F: FnMut(&Snapshot<M::Input, M::Output>) -> Result<M::Input, Error>,
{
    let initial_output = model.call(&initial).map_err(Error::model)?;
    let mut current = Snapshot::new(initial, initial_output);

    let mut history = Vec::with_capacity(steps + 1);
    history.push(current.clone());

    if stop_requested(&mut observer, 0, &current) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        });
    }

    for step in 1..=steps {
        let next_input = advance(&current)?;
        let next_output = model.call(&next_input).map_err(Error::model)?;
        current = Snapshot::new(next_input, next_output);

        history.push(current.clone());

        if stop_requested(&mut observer, step, &current) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

fn stop_requested<I, O, Obs>(observer: &mut Obs, step: usize, snapshot: &Snapshot<I, O>) -> bool
where
    I: Clone,
    O: Clone,
    Obs: Observer<Event<I, O>, Action>,
{
    let event = Event {
        step,
        snapshot: snapshot.clone(),
    };
    matches!(observer.observe(&event), Some(Action::StopEarly))
}
