use simplecss::{AttributeOperator, PseudoClass, Selector};

use crate::document::tree::{NodeId, SvgDocument};
use crate::foundation::error::{SvgStepError, SvgStepResult};

#[derive(Clone, Copy)]
struct ElementRef<'a> {
    doc: &'a SvgDocument,
    id: NodeId,
}

impl simplecss::Element for ElementRef<'_> {
    fn parent_element(&self) -> Option<Self> {
        self.doc
            .parent(self.id)
            .filter(|p| self.doc.is_element(*p))
            .map(|id| Self { doc: self.doc, id })
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.doc
            .prev_sibling_element(self.id)
            .map(|id| Self { doc: self.doc, id })
    }

    fn has_local_name(&self, name: &str) -> bool {
        self.doc.tag(self.id) == Some(name)
    }

    fn attribute_matches(&self, local_name: &str, operator: AttributeOperator) -> bool {
        self.doc
            .attr(self.id, local_name)
            .is_some_and(|v| operator.matches(v))
    }

    fn pseudo_class_matches(&self, class: PseudoClass) -> bool {
        match class {
            PseudoClass::FirstChild => self.prev_sibling_element().is_none(),
            _ => false,
        }
    }
}

/// Resolve a selector list against the element descendants of `scope`.
///
/// Results are in document order without duplicates. A selector that does not parse is an
/// error; a selector that parses but matches nothing is an empty result.
pub fn select(doc: &SvgDocument, scope: NodeId, selector: &str) -> SvgStepResult<Vec<NodeId>> {
    let compiled = compile(selector)?;
    Ok(doc
        .descendants(scope)
        .into_iter()
        .filter(|id| {
            let el = ElementRef { doc, id: *id };
            compiled.iter().any(|s| s.matches(&el))
        })
        .collect())
}

/// Whether the element `id` itself matches `selector`.
pub fn matches(doc: &SvgDocument, id: NodeId, selector: &str) -> SvgStepResult<bool> {
    if !doc.is_element(id) {
        return Ok(false);
    }
    let el = ElementRef { doc, id };
    Ok(compile(selector)?.iter().any(|s| s.matches(&el)))
}

fn compile(selector: &str) -> SvgStepResult<Vec<Selector<'_>>> {
    let parts = split_selector_list(selector);
    if parts.is_empty() {
        return Err(SvgStepError::selector("empty selector"));
    }
    parts
        .into_iter()
        .map(|p| {
            Selector::parse(p)
                .ok_or_else(|| SvgStepError::selector(format!("cannot parse selector '{p}'")))
        })
        .collect()
}

/// Split `a, b > c, [x="1,2"]` on top-level commas.
fn split_selector_list(selector: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in selector.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth -= 1,
            (None, ',') if depth == 0 => {
                out.push(selector[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(selector[start..].trim());
    out.retain(|s| !s.is_empty());
    out
}

#[cfg(test)]
#[path = "../../tests/unit/document/select.rs"]
mod tests;
