//! Batch data structure

use ndarray::{Array1, Array2};

/// Which input axis holds the batch dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchLayout {
    /// `inputs` is `[batch, features]`
    #[default]
    BatchFirst,
    /// `inputs` is `[sequence, batch]`
    SeqFirst,
}

/// A batch of inputs and targets
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub inputs: Array2<f64>,
    pub targets: Array1<f64>,
}

impl Batch {
    pub fn new(inputs: Array2<f64>, targets: Array1<f64>) -> Self {
        Self { inputs, targets }
    }

    /// Number of samples, read from the batch axis of the inputs
    pub fn size(&self, layout: BatchLayout) -> usize {
        match layout {
            BatchLayout::BatchFirst => self.inputs.nrows(),
            BatchLayout::SeqFirst => self.inputs.ncols(),
        }
    }
}
