use bpsim_core::{BranchEvent, Outcome, Predictor};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Result of replaying a trace through a predictor.
#[derive(Debug, Default)]
pub struct Replay {
    /// Prediction made for every conditional branch, in order.
    pub predictions: Vec<Outcome>,
    /// Conditional branches seen.
    pub branches: usize,
    /// Conditional branches predicted wrongly.
    pub mispredictions: usize,
}

/// Replays `trace` the way a trace driver does: predict, then train.
pub fn replay(bp: &mut Predictor, trace: &[BranchEvent]) -> Replay {
    let mut result = Replay::default();
    for event in trace {
        if event.is_conditional {
            let prediction = bp.make_prediction(event.pc, event.target, event.is_direct);
            result.predictions.push(prediction);
            result.branches += 1;
            if prediction != event.outcome {
                result.mispredictions += 1;
            }
        }
        bp.train_predictor(event);
    }
    result
}
