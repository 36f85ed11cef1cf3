//! Convert an XML filter AST to text.

use super::ast::*;
use super::string::Xml;

impl XmlFragment {
    pub fn to_xml(&self, xml: &mut Xml) {
        if let Some(filter) = &self.filter {
            filter.to_xml(xml);
        }
    }
}

impl std::fmt::Display for XmlFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut xml = Xml::new();
        self.to_xml(&mut xml);
        f.write_str(&xml.text)
    }
}

impl Filter {
    pub fn to_xml(&self, xml: &mut Xml) {
        xml.open_element("filter", &[("type", self.filter_type.name())]);
        for item in &self.items {
            item.to_xml(xml);
        }
        xml.close_element("filter");
    }
}

impl FilterItem {
    pub fn to_xml(&self, xml: &mut Xml) {
        match self {
            FilterItem::Condition(condition) => condition.to_xml(xml),
            FilterItem::Filter(filter) => filter.to_xml(xml),
        }
    }
}

impl Condition {
    pub fn to_xml(&self, xml: &mut Xml) {
        let name_and_operator = [
            ("attribute", self.attribute.as_str()),
            ("operator", self.operator.as_str()),
        ];
        match &self.value {
            ConditionValue::None => xml.empty_element("condition", &name_and_operator),
            ConditionValue::Attribute(value) => xml.empty_element(
                "condition",
                &[
                    name_and_operator[0],
                    name_and_operator[1],
                    ("value", value.as_str()),
                ],
            ),
            ConditionValue::Elements(values) => {
                xml.open_element("condition", &name_and_operator);
                for value in values {
                    xml.text_element("value", value);
                }
                xml.close_element("condition");
            }
        }
    }
}
