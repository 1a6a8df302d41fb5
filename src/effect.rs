//! Effect instance: parameter control plus the audio-thread processor
//!
//! An [`EffectInstance`] bundles both halves for hosts that drive everything
//! from one place. [`EffectInstance::into_parts`] splits it so the
//! [`ParameterController`] can live on a control thread while the
//! [`BlockProcessor`] runs in the audio callback.

use crate::dsp::StereoEnhancer;
use crate::params::{parameter_channel, EffectParams, ParameterController, ParameterReader};

/// Audio-thread half: reads one parameter snapshot per block
#[derive(Debug)]
pub struct BlockProcessor {
    params: ParameterReader,
    enhancer: StereoEnhancer,
}

impl BlockProcessor {
    /// Process interleaved stereo frames in place
    ///
    /// Returns the snapshot the block was rendered with.
    pub fn process(&mut self, frames: &mut [f32]) -> EffectParams {
        let snapshot = self.params.snapshot();
        self.enhancer.process_block(&snapshot, frames);
        snapshot
    }

    pub fn enhancer(&self) -> &StereoEnhancer {
        &self.enhancer
    }
}

/// One effect instance as created by the host
#[derive(Debug)]
pub struct EffectInstance {
    controller: ParameterController,
    processor: BlockProcessor,
}

impl EffectInstance {
    /// Factory producing a fully initialised instance from `params`
    pub fn new(params: EffectParams) -> Self {
        let (controller, reader) = parameter_channel(params);
        Self {
            controller,
            processor: BlockProcessor {
                params: reader,
                enhancer: StereoEnhancer::new(),
            },
        }
    }

    pub fn controller(&mut self) -> &mut ParameterController {
        &mut self.controller
    }

    pub fn processor(&mut self) -> &mut BlockProcessor {
        &mut self.processor
    }

    /// Currently published parameters
    pub fn params(&self) -> EffectParams {
        self.controller.current()
    }

    /// Split into the control-thread and audio-thread halves
    pub fn into_parts(self) -> (ParameterController, BlockProcessor) {
        (self.controller, self.processor)
    }
}

impl Default for EffectInstance {
    fn default() -> Self {
        Self::new(EffectParams::default())
    }
}
