use candle_core::{DType, Device, IndexOp, Result, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;
use std::sync::Arc;

use crate::constants::NSP_CLASSES;
use crate::model::{ModelError, NspModel};

/// BERT encoder with the next-sentence-prediction head.
///
/// Mirrors the HF `BertForNextSentencePrediction` checkpoint layout: the
/// pooler projects the CLS position through a tanh dense layer, and
/// `cls.seq_relationship` maps the pooled vector to the two NSP logits.
struct BertNspImpl {
    bert: BertModel,
    pooler: Linear,
    seq_relationship: Linear,
}

impl BertNspImpl {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        // Checkpoints exported from HF carry a `bert.` prefix; bare encoder
        // exports do not. The NSP head lives under `cls.` in both layouts.
        let (bert, pooler_vb) = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            (
                BertModel::load(vb.pp("bert"), config)?,
                vb.pp("bert.pooler.dense"),
            )
        } else {
            (BertModel::load(vb.clone(), config)?, vb.pp("pooler.dense"))
        };

        let hidden_size = config.hidden_size;
        let pooler = candle_nn::linear(hidden_size, hidden_size, pooler_vb)?;
        let seq_relationship =
            candle_nn::linear(hidden_size, NSP_CLASSES, vb.pp("cls.seq_relationship"))?;

        Ok(Self {
            bert,
            pooler,
            seq_relationship,
        })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let sequence_output = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_state = sequence_output.i((.., 0, ..))?;
        let pooled = self.pooler.forward(&cls_state)?.tanh()?;
        self.seq_relationship.forward(&pooled)
    }
}

/// Cheap-to-clone handle to a loaded NSP model.
#[derive(Clone)]
pub struct BertForNextSentencePrediction {
    inner: Arc<BertNspImpl>,
    device: Device,
}

impl BertForNextSentencePrediction {
    /// Loads `config.json` and `model.safetensors` from a model directory.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle_core::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let inner = BertNspImpl::load(vb, &config)?;

        Ok(Self {
            inner: Arc::new(inner),
            device: device.clone(),
        })
    }
}

impl NspModel for BertForNextSentencePrediction {
    fn set_eval(&self) {
        // candle modules hold no training state (dropout is inert at
        // inference), so evaluation mode needs no work here.
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        attention_mask: &Tensor,
        token_type_ids: &Tensor,
    ) -> std::result::Result<Tensor, ModelError> {
        self.inner
            .forward(input_ids, token_type_ids, Some(attention_mask))
            .map_err(|e| ModelError::InferenceFailed {
                reason: e.to_string(),
            })
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
