//! The CRNN recognition network.
//!
//! A small convolutional stack collapses the `[1, 32, 128]` input into a
//! horizontal feature sequence, a GRU runs over that sequence, and a
//! linear head produces per-timestep logits over the symbol classes
//! (blank included). Weight names follow the PyTorch export layout:
//! `conv1` through `conv4`, `rnn`, and `head`.

use candle_core::{Module, Result as CandleResult, Tensor};
use candle_nn::rnn::{gru, GRUConfig, GRU, RNN};
use candle_nn::{conv2d, linear, Conv2d, Conv2dConfig, Linear, VarBuilder};

/// Network hyperparameters. These are fixed by the pretrained weights;
/// only the class count varies with the vocabulary.
#[derive(Debug, Clone)]
pub struct CrnnConfig {
    /// Number of output classes including the CTC blank.
    pub num_classes: usize,
    /// GRU hidden size.
    pub hidden_size: usize,
    /// Channels of the four convolution blocks.
    pub conv_channels: [usize; 4],
}

impl CrnnConfig {
    /// Configuration matching the stock pretrained weights.
    #[must_use]
    pub fn with_classes(num_classes: usize) -> Self {
        Self {
            num_classes,
            hidden_size: 256,
            conv_channels: [64, 128, 256, 256],
        }
    }

    /// Features per timestep entering the GRU: the last conv block's
    /// channels times the residual height (32 pooled by 2 four times).
    #[must_use]
    pub fn rnn_input_size(&self) -> usize {
        self.conv_channels[3] * 2
    }
}

/// The recognition network.
pub struct Crnn {
    conv1: Conv2d,
    conv2: Conv2d,
    conv3: Conv2d,
    conv4: Conv2d,
    rnn: GRU,
    head: Linear,
}

impl Crnn {
    /// Builds the network, pulling weights from the given builder.
    ///
    /// # Errors
    ///
    /// Returns an error when a weight tensor is missing or mis-shaped.
    pub fn load(config: &CrnnConfig, vb: VarBuilder) -> CandleResult<Self> {
        let conv_cfg = Conv2dConfig {
            padding: 1,
            ..Default::default()
        };
        let [c1, c2, c3, c4] = config.conv_channels;

        let conv1 = conv2d(1, c1, 3, conv_cfg, vb.pp("conv1"))?;
        let conv2 = conv2d(c1, c2, 3, conv_cfg, vb.pp("conv2"))?;
        let conv3 = conv2d(c2, c3, 3, conv_cfg, vb.pp("conv3"))?;
        let conv4 = conv2d(c3, c4, 3, conv_cfg, vb.pp("conv4"))?;

        let rnn = gru(
            config.rnn_input_size(),
            config.hidden_size,
            GRUConfig::default(),
            vb.pp("rnn"),
        )?;
        let head = linear(config.hidden_size, config.num_classes, vb.pp("head"))?;

        Ok(Self {
            conv1,
            conv2,
            conv3,
            conv4,
            rnn,
            head,
        })
    }

    /// Runs the network on a `[batch, 1, 32, 128]` input, producing
    /// `[batch, steps, classes]` logits.
    ///
    /// # Errors
    ///
    /// Returns an error when the input shape does not match the network.
    pub fn forward(&self, images: &Tensor) -> CandleResult<Tensor> {
        // Two full poolings, then two height-only poolings keep the
        // 32-step horizontal resolution for the sequence model.
        let x = self.conv1.forward(images)?.relu()?.max_pool2d(2)?;
        let x = self.conv2.forward(&x)?.relu()?.max_pool2d(2)?;
        let x = self.conv3.forward(&x)?.relu()?.max_pool2d((2, 1))?;
        let x = self.conv4.forward(&x)?.relu()?.max_pool2d((2, 1))?;

        // (batch, channels, height, width) -> (batch, width, channels*height)
        let x = x.flatten(1, 2)?.transpose(1, 2)?.contiguous()?;

        let states = self.rnn.seq(&x)?;
        let hidden: Vec<Tensor> = states.iter().map(|s| s.h().clone()).collect();
        let hidden = Tensor::stack(&hidden, 1)?;
        self.head.forward(&hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device};

    #[test]
    fn test_forward_shapes() {
        let device = Device::Cpu;
        let config = CrnnConfig::with_classes(40);
        let vb = VarBuilder::zeros(DType::F32, &device);
        let model = Crnn::load(&config, vb).unwrap();

        let input = Tensor::zeros((1, 1, 32, 128), DType::F32, &device).unwrap();
        let logits = model.forward(&input).unwrap();
        assert_eq!(logits.dims(), &[1, 32, 40]);
    }

    #[test]
    fn test_rnn_input_size() {
        let config = CrnnConfig::with_classes(40);
        assert_eq!(config.rnn_input_size(), 512);
    }
}
