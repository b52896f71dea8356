//! `wasm-bindgen` wrapper for browser renderers.
//!
//! JavaScript owns a [`WasmAnnealer`], calls `tick()` from its animation
//! frame callback and redraws from the accessors.

use crate::sa::{AnnealConfig, AnnealingSession};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmAnnealer {
    session: AnnealingSession,
}

#[wasm_bindgen]
impl WasmAnnealer {
    /// Starts a session with the default schedule on `city_count` random cities.
    #[wasm_bindgen(constructor)]
    pub fn new(city_count: usize, seed: Option<u64>) -> Result<WasmAnnealer, JsError> {
        let mut config = AnnealConfig::default().with_city_count(city_count);
        config.seed = seed;
        let session = AnnealingSession::new(config)?;
        Ok(Self { session })
    }

    /// Advances by one display tick. Returns the number of active steps.
    pub fn tick(&mut self) -> usize {
        self.session.tick().active_steps
    }

    /// Starts over on a new random point set.
    pub fn reset(&mut self) -> Result<(), JsError> {
        self.session.reset()?;
        Ok(())
    }

    /// City coordinates, flattened as `[x0, y0, x1, y1, ...]`.
    pub fn points(&self) -> Vec<f64> {
        self.session
            .engine()
            .points()
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    #[wasm_bindgen(js_name = currentTour)]
    pub fn current_tour(&self) -> Vec<u32> {
        self.session
            .engine()
            .current_tour()
            .iter()
            .map(|&c| c as u32)
            .collect()
    }

    #[wasm_bindgen(js_name = bestTour)]
    pub fn best_tour(&self) -> Vec<u32> {
        self.session
            .engine()
            .best_tour()
            .iter()
            .map(|&c| c as u32)
            .collect()
    }

    #[wasm_bindgen(js_name = currentEnergy)]
    pub fn current_energy(&self) -> f64 {
        self.session.engine().current_energy()
    }

    #[wasm_bindgen(js_name = bestEnergy)]
    pub fn best_energy(&self) -> f64 {
        self.session.engine().best_energy()
    }

    pub fn temperature(&self) -> f64 {
        self.session.engine().temperature()
    }

    #[wasm_bindgen(js_name = isFrozen)]
    pub fn is_frozen(&self) -> bool {
        self.session.engine().is_frozen()
    }

    #[wasm_bindgen(js_name = statusLabel)]
    pub fn status_label(&self) -> String {
        self.session.status_label().to_string()
    }

    /// The full engine snapshot as a plain JS object.
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.session.engine().snapshot())
            .map_err(|e| JsError::new(&e.to_string()))
    }
}
