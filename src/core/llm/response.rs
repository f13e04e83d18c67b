//! Deterministic response text synthesized from a model descriptor.

use crate::core::catalog::ModelDescriptor;

/// Fallback shown when a model does not document its parameter counts.
pub(super) const FALLBACK_PARAMETERS: &str = "N/A";
/// Fallback shown when a model does not document its context window.
pub(super) const FALLBACK_CONTEXT_WINDOW: &str = "Standard";
/// Fallback shown when a model lists no feature tags.
pub(super) const FALLBACK_FEATURES: &str = "General Purpose";

/// Compose the canned response for a model. The text references the model's
/// display name, provider, and metadata, substituting fallbacks for absent
/// fields. Newlines delimit the segments delivered during simulated streaming.
pub(super) fn compose(model: &ModelDescriptor) -> String {
    let parameters = model.parameters.as_deref().unwrap_or(FALLBACK_PARAMETERS);
    let active_parameters = model
        .active_parameters
        .as_deref()
        .unwrap_or(FALLBACK_PARAMETERS);
    let context_window = model
        .context_window
        .as_deref()
        .unwrap_or(FALLBACK_CONTEXT_WINDOW);
    let features = model
        .features
        .as_ref()
        .filter(|f| !f.is_empty())
        .map(|f| f.join(", "))
        .unwrap_or_else(|| FALLBACK_FEATURES.to_string());

    format!(
        "This is a simulated response from {name} ({provider}).\n\
         \n\
         Model Details:\n\
         - Parameters: {parameters}\n\
         - Active Parameters: {active_parameters}\n\
         - Context Window: {context_window}\n\
         - Features: {features}\n\
         \n\
         To connect to the actual API, you would need to implement the specific API call for {provider} models.\n\
         \n\
         This playground provides a framework where you can input your API key and test different AI models. The actual API integration would depend on the specific endpoints and authentication methods used by each provider.",
        name = model.name,
        provider = model.provider,
    )
}
