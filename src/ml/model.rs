use burn::{
    nn::{
        BiLstm, BiLstmConfig,
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{log_softmax, relu, softmax},
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
//
// Besides the layer sizes this also records the input contract
// (sequence length, character rule) so inference can rebuild it.
#[derive(Config, Debug)]
pub struct SiteClassifierConfig {
    /// Embedding table size: vocabulary length + 1 for padding.
    pub vocab_size:  usize,
    pub num_classes: usize,
    #[config(default = 100)]
    pub max_length: usize,
    #[config(default = true)]
    pub unicode_tokens: bool,
    #[config(default = 128)]
    pub embedding_dim: usize,
    #[config(default = 64)]
    pub encoder_hidden: usize,
    #[config(default = 32)]
    pub summary_hidden: usize,
    #[config(default = 64)]
    pub dense_hidden: usize,
    #[config(default = 32)]
    pub dense_out: usize,
    #[config(default = 0.3)]
    pub dropout_hidden: f64,
    #[config(default = 0.2)]
    pub dropout_out: f64,
}

impl SiteClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SiteClassifier<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let encoder   = BiLstmConfig::new(self.embedding_dim, self.encoder_hidden, true).init(device);
        let summarizer =
            BiLstmConfig::new(2 * self.encoder_hidden, self.summary_hidden, true).init(device);
        let dense_hidden = LinearConfig::new(2 * self.summary_hidden, self.dense_hidden).init(device);
        let dense_out    = LinearConfig::new(self.dense_hidden, self.dense_out).init(device);
        let classifier   = LinearConfig::new(self.dense_out, self.num_classes).init(device);
        SiteClassifier {
            embedding,
            encoder,
            summarizer,
            dense_hidden,
            dropout_hidden: DropoutConfig::new(self.dropout_hidden).init(),
            dense_out,
            dropout_out: DropoutConfig::new(self.dropout_out).init(),
            classifier,
        }
    }
}

/// Embedding → BiLSTM (full sequence) → BiLSTM (summary) →
/// Dense+ReLU → Dropout → Dense+ReLU → Dropout → Dense.
#[derive(Module, Debug)]
pub struct SiteClassifier<B: Backend> {
    pub embedding:      Embedding<B>,
    pub encoder:        BiLstm<B>,
    pub summarizer:     BiLstm<B>,
    pub dense_hidden:   Linear<B>,
    pub dropout_hidden: Dropout,
    pub dense_out:      Linear<B>,
    pub dropout_out:    Dropout,
    pub classifier:     Linear<B>,
}

impl<B: Backend> SiteClassifier<B> {
    /// input_ids: [batch, seq_len] → logits: [batch, num_classes]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(input_ids); // [batch, seq_len, embedding_dim]

        let (sequence, _) = self.encoder.forward(x, None); // [batch, seq_len, 2 * encoder_hidden]
        let (summary, _)  = self.summarizer.forward(sequence, None);
        let x = final_states(summary); // [batch, 2 * summary_hidden]

        let x = self.dropout_hidden.forward(relu(self.dense_hidden.forward(x)));
        let x = self.dropout_out.forward(relu(self.dense_out.forward(x)));
        self.classifier.forward(x)
    }

    /// Class probabilities; every row sums to 1.
    pub fn predict(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        softmax(self.forward(input_ids), 1)
    }

    pub fn forward_loss(
        &self,
        input_ids: Tensor<B, 2, Int>,
        targets:   Tensor<B, 2>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(input_ids);
        let loss   = categorical_cross_entropy(logits.clone(), targets);
        (loss, logits)
    }
}

/// Final summary of a bidirectional sequence output.
///
/// The forward direction has read the whole sequence at the last
/// step; the backward direction has read it at step 0. Their
/// halves are concatenated: [batch, seq_len, 2h] → [batch, 2h].
fn final_states<B: Backend>(output: Tensor<B, 3>) -> Tensor<B, 2> {
    let [batch_size, seq_len, width] = output.dims();
    let hidden = width / 2;

    let forward_last = output
        .clone()
        .slice([0..batch_size, seq_len - 1..seq_len, 0..hidden])
        .reshape([batch_size, hidden]);
    let backward_first = output
        .slice([0..batch_size, 0..1, hidden..width])
        .reshape([batch_size, hidden]);

    Tensor::cat(vec![forward_last, backward_first], 1)
}

/// Mean of -Σ target · log softmax(logits) over the batch.
pub fn categorical_cross_entropy<B: Backend>(
    logits:  Tensor<B, 2>,
    targets: Tensor<B, 2>,
) -> Tensor<B, 1> {
    let log_probs = log_softmax(logits, 1);
    (targets * log_probs).sum_dim(1).mean().neg()
}

/// How many rows have their highest score on the one-hot target.
pub fn count_correct<B: Backend>(scores: Tensor<B, 2>, targets: Tensor<B, 2>) -> usize {
    // argmax(1) returns [batch, 1] — flatten to [batch] before comparing
    let predicted = scores.argmax(1).flatten::<1>(0, 1);
    let expected  = targets.argmax(1).flatten::<1>(0, 1);
    predicted
        .equal(expected)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>() as usize
}
