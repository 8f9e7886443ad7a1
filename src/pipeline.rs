use crate::filters::{Filter, FilterKind, TextFilter, DEFAULT_MIN_LENGTH};

/// Ordered chain of filters applied left to right.
///
/// Order matters: the output of each filter is the input of the next, and
/// most filter pairs do not commute. An empty pipeline passes text through
/// unchanged.
#[derive(Debug, Clone)]
pub struct FilterPipeline<F = Filter> {
    filters: Vec<F>,
}

impl<F: TextFilter> FilterPipeline<F> {
    pub fn new(filters: Vec<F>) -> Self {
        Self { filters }
    }

    /// Fold `input` through every filter in order
    pub fn apply(&self, input: Option<&str>) -> Option<String> {
        let mut text = input?.to_string();
        for filter in &self.filters {
            text = filter.filter_text(&text);
        }
        Some(text)
    }

    pub fn filters(&self) -> &[F] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<F: TextFilter> Default for FilterPipeline<F> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<F: TextFilter> TextFilter for FilterPipeline<F> {
    fn filter_text(&self, input: &str) -> String {
        self.filters
            .iter()
            .fold(input.to_string(), |text, filter| filter.filter_text(&text))
    }
}

/// Builds a [`FilterPipeline`] from the filter names enabled in configuration
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    kinds: Vec<FilterKind>,
    min_len: usize,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            kinds: Vec::new(),
            min_len: DEFAULT_MIN_LENGTH,
        }
    }

    pub fn with_filters(mut self, kinds: impl IntoIterator<Item = FilterKind>) -> Self {
        self.kinds.extend(kinds);
        self
    }

    pub fn with_min_length(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    pub fn build(self) -> FilterPipeline {
        FilterPipeline::new(
            self.kinds
                .into_iter()
                .map(|kind| kind.build(self.min_len))
                .collect(),
        )
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum TestFilter {
        Append(&'static str),
        Uppercase,
    }

    impl TextFilter for TestFilter {
        fn filter_text(&self, input: &str) -> String {
            match self {
                TestFilter::Append(suffix) => format!("{}{}", input, suffix),
                TestFilter::Uppercase => input.to_uppercase(),
            }
        }
    }

    #[test]
    fn test_filters_applied_in_sequence() {
        let pipeline = FilterPipeline::new(vec![TestFilter::Append("A"), TestFilter::Append("B")]);
        assert_eq!(pipeline.apply(Some("Test")).as_deref(), Some("TestAB"));
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline: FilterPipeline = FilterPipeline::default();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply(Some("Test")).as_deref(), Some("Test"));
        assert_eq!(pipeline.apply(Some("")).as_deref(), Some(""));
    }

    #[test]
    fn test_absent_input_stays_absent() {
        let pipeline = FilterPipeline::new(vec![TestFilter::Uppercase, TestFilter::Append("A")]);
        assert_eq!(pipeline.apply(None), None);

        let builtin = PipelineBuilder::new()
            .with_filters([FilterKind::ContainsT, FilterKind::VowelMiddle])
            .build();
        assert_eq!(builtin.apply(None), None);
    }

    #[test]
    fn test_uppercase_transforms() {
        let pipeline = FilterPipeline::new(vec![TestFilter::Uppercase]);
        assert_eq!(pipeline.apply(Some("Test")).as_deref(), Some("TEST"));
    }

    #[test]
    fn test_order_changes_result() {
        let append_first = FilterPipeline::new(vec![TestFilter::Append("a"), TestFilter::Uppercase]);
        let upper_first = FilterPipeline::new(vec![TestFilter::Uppercase, TestFilter::Append("a")]);

        assert_eq!(append_first.apply(Some("Test")).as_deref(), Some("TESTA"));
        assert_eq!(upper_first.apply(Some("Test")).as_deref(), Some("TESTa"));
    }

    #[test]
    fn test_builtin_filters_do_not_commute() {
        let input = Some("tan, sky");
        let t_first = PipelineBuilder::new()
            .with_filters([FilterKind::ContainsT, FilterKind::VowelMiddle])
            .build();
        let vowel_first = PipelineBuilder::new()
            .with_filters([FilterKind::VowelMiddle, FilterKind::ContainsT])
            .build();

        assert_eq!(t_first.apply(input).as_deref(), Some(", sky"));
        assert_eq!(vowel_first.apply(input).as_deref(), Some("sky"));
    }

    #[test]
    fn test_builder_threads_min_length() {
        let pipeline = PipelineBuilder::new()
            .with_filters([FilterKind::MinLength])
            .with_min_length(6)
            .build();
        assert_eq!(pipeline.filters(), &[Filter::MinLength { min_len: 6 }]);
        assert_eq!(
            pipeline.apply(Some("short longer longest")).as_deref(),
            Some("longer longest")
        );
    }

    #[test]
    fn test_pipeline_is_a_filter() {
        let pipeline = PipelineBuilder::new()
            .with_filters([FilterKind::MinLength, FilterKind::ContainsT])
            .build();
        assert_eq!(pipeline.len(), 2);
        assert_eq!(
            pipeline.filter_text("An apple a day keeps the doctor away"),
            "apple day keeps away"
        );
    }
}
