//! Type definitions of an XML `<filter>` fragment.

/// A compiled XML filter. Empty when there was nothing to filter on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlFragment {
    pub filter: Option<Filter>,
}

/// A `<filter type="...">` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub filter_type: FilterType,
    pub items: Vec<FilterItem>,
}

/// The `type` attribute of a `<filter>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    And,
    Or,
    /// Negates the conjunction of its items.
    Not,
}

impl FilterType {
    pub fn name(&self) -> &'static str {
        match self {
            FilterType::And => "and",
            FilterType::Or => "or",
            FilterType::Not => "not",
        }
    }
}

/// A child of a `<filter>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterItem {
    Condition(Condition),
    Filter(Filter),
}

/// A `<condition>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub attribute: String,
    pub operator: String,
    pub value: ConditionValue,
}

/// Where a condition keeps its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionValue {
    /// No value at all, as for null tests
    None,
    /// A `value="..."` attribute
    Attribute(String),
    /// One `<value>` child element per entry
    Elements(Vec<String>),
}
