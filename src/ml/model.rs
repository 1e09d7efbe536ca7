use burn::{
    nn::{
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
    },
    prelude::*,
    tensor::backend::AutodiffBackend,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct NextWordModelConfig {
    pub vocab_size: usize,
    pub d_embed:    usize,
    pub d_hidden:   usize,
    pub d_dense:    usize,
}

impl NextWordModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> NextWordModel<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.d_embed).init(device);
        let lstm      = LstmConfig::new(self.d_embed, self.d_hidden, true).init(device);
        let dense     = LinearConfig::new(self.d_hidden, self.d_dense).init(device);
        let output    = LinearConfig::new(self.d_dense, self.vocab_size).init(device);
        NextWordModel { embedding, lstm, dense, output }
    }
}

#[derive(Module, Debug)]
pub struct NextWordModel<B: Backend> {
    pub embedding: Embedding<B>,
    pub lstm:      Lstm<B>,
    pub dense:     Linear<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> NextWordModel<B> {
    /// input_ids: [batch, input_len] → logits over the vocabulary: [batch, vocab_size]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let embedded = self.embedding.forward(input_ids); // [batch, input_len, d_embed]

        // Only the final hidden state feeds the classifier head;
        // the per-step outputs are discarded.
        let (_, state) = self.lstm.forward(embedded, None);
        let hidden = state.hidden; // [batch, d_hidden]

        let dense = burn::tensor::activation::relu(self.dense.forward(hidden));
        self.output.forward(dense) // [batch, vocab_size]
    }

    /// Cross-entropy against the true next-word id.
    /// The returned logits are reused for the accuracy metric.
    pub fn forward_loss(
        &self,
        input_ids: Tensor<B, 2, Int>,
        targets:   Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>)
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(input_ids);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new()
            .init(&logits.device());
        let loss = ce.forward(logits.clone(), targets);
        (loss, logits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};

    #[test]
    fn test_forward_shape() {
        let device = NdArrayDevice::default();
        let model = NextWordModelConfig::new(7, 4, 5, 6).init::<NdArray>(&device);

        let input = Tensor::<NdArray, 2, Int>::from_ints([[0, 0, 1, 2], [3, 4, 5, 6]], &device);
        let logits = model.forward(input);

        assert_eq!(logits.dims(), [2, 7]);
    }

    #[test]
    fn test_forward_loss_is_scalar() {
        type B = Autodiff<NdArray>;
        let device = NdArrayDevice::default();
        let model = NextWordModelConfig::new(7, 4, 5, 6).init::<B>(&device);

        let input = Tensor::<B, 2, Int>::from_ints([[0, 1, 2], [2, 3, 4]], &device);
        let targets = Tensor::<B, 1, Int>::from_ints([3, 1], &device);

        let (loss, logits) = model.forward_loss(input, targets);
        assert_eq!(loss.dims(), [1]);
        assert_eq!(logits.dims(), [2, 7]);
    }
}
