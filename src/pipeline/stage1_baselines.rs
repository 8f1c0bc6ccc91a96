use crate::model::baselines::Baselines;
use crate::model::category::Category;
use crate::store::ResultsStore;

/// Best-in-round values for `category` at `round_index`: max unloaded
/// payload, min positive loading time, min positive circuit time, max glide
/// time. Any value with no usable data falls back to 1.
pub fn get_best_values(store: &ResultsStore, category: Category, round_index: usize) -> Baselines {
    let mut best_payload = 0.0f64;
    let mut best_loading = f64::INFINITY;
    let mut best_circuit = f64::INFINITY;
    let mut best_glide = 0.0f64;

    for (_, entry) in store.round_entries(category, round_index) {
        let inputs = &entry.inputs;
        if inputs.is_empty() {
            continue;
        }
        if let Some(payload) = inputs.unloaded_payload {
            best_payload = best_payload.max(payload);
        }
        if let Some(t) = inputs.loading_time.filter(|t| *t > 0.0) {
            best_loading = best_loading.min(t);
        }
        if let Some(t) = inputs.circuit_time.filter(|t| *t > 0.0) {
            best_circuit = best_circuit.min(t);
        }
        if let Some(t) = inputs.glide_time {
            best_glide = best_glide.max(t);
        }
    }

    Baselines {
        payload: if best_payload > 0.0 { best_payload } else { 1.0 },
        loading_time: if best_loading.is_finite() { best_loading } else { 1.0 },
        circuit_time: if best_circuit.is_finite() { best_circuit } else { 1.0 },
        glide_time: if best_glide > 0.0 { best_glide } else { 1.0 },
    }
}

/// Baselines for every round index `0..round_count`, computed once each.
pub fn baselines_by_round(store: &ResultsStore, category: Category) -> Vec<Baselines> {
    (0..store.round_count(category))
        .map(|round| {
            let b = get_best_values(store, category, round);
            tracing::debug!(
                %category,
                round,
                payload = b.payload,
                loading_time = b.loading_time,
                circuit_time = b.circuit_time,
                glide_time = b.glide_time,
                "round baselines"
            );
            b
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_baselines.rs"]
mod tests;
