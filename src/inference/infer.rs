//! Filter and sort field inference

use crate::config::InferenceOptions;
use crate::node::Node;

use super::path::FieldPath;
use super::sampler::Sampler;
use super::shape::{FieldDescriptor, FilterInputShape};

/// Inference output for one node type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferredFields {
    /// Filterable fields with their kinds
    pub filter_fields: FilterInputShape,
    /// Paths eligible for ordering
    pub sort_paths: Vec<FieldPath>,
}

impl InferredFields {
    /// Returns true if nothing is filterable
    pub fn is_empty(&self) -> bool {
        self.filter_fields.is_empty()
    }
}

/// Derives filter and sort fields from node samples and plugin declarations
#[derive(Debug, Clone, Default)]
pub struct FieldInference {
    options: InferenceOptions,
}

impl FieldInference {
    /// Creates an inference pass with the given options
    pub fn new(options: InferenceOptions) -> Self {
        Self { options }
    }

    /// Samples every node, then merges plugin fields over the sample.
    ///
    /// Plugin fields win on path collision and keep the sampled position;
    /// plugin-only fields are appended in declaration order.
    pub fn infer<I, N>(&self, nodes: I, plugin_fields: &[FieldDescriptor]) -> InferredFields
    where
        I: IntoIterator<Item = N>,
        N: AsRef<Node>,
    {
        let mut sampler = Sampler::new(&self.options);
        for node in nodes {
            sampler.observe(node.as_ref());
        }
        let observed = sampler.observed();
        let mut filter_fields = sampler.finish();

        for descriptor in plugin_fields {
            filter_fields.declare(descriptor.path.segments(), descriptor.kind.clone());
        }

        let sort_paths = filter_fields.sortable_paths();

        tracing::debug!(
            event = "FIELDS_INFERRED",
            nodes = observed,
            plugin_fields = plugin_fields.len(),
            fields = filter_fields.len(),
            sortable = sort_paths.len(),
        );

        InferredFields {
            filter_fields,
            sort_paths,
        }
    }
}

/// Infers filter and sort fields with default options
pub fn infer_filter_and_sort_fields<I, N>(nodes: I, plugin_fields: &[FieldDescriptor]) -> InferredFields
where
    I: IntoIterator<Item = N>,
    N: AsRef<Node>,
{
    FieldInference::default().infer(nodes, plugin_fields)
}
