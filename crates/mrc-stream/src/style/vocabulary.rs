// Dweve MRC - Markup Record Compiler
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Element names recognized by the style layer.

/// Kind of block a [`StyleLayer`](super::StyleLayer) interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `<Style>`: has `Setters` and `Triggers`.
    Style,
    /// `<ControlTemplate>` and friends: a visual tree plus `Triggers`.
    Template,
}

/// Names (local, without namespace) the style layer gives meaning to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleVocabulary {
    /// Elements that open a style block.
    pub style_blocks: Vec<String>,
    /// Elements that open a template block.
    pub template_blocks: Vec<String>,
    /// Setter elements.
    pub setters: Vec<String>,
    /// Trigger elements (including event triggers).
    pub triggers: Vec<String>,
    /// Trigger elements whose content is a list of actions.
    pub event_triggers: Vec<String>,
    /// Condition elements of multi-triggers.
    pub conditions: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for StyleVocabulary {
    fn default() -> Self {
        Self {
            style_blocks: names(&["Style"]),
            template_blocks: names(&[
                "ControlTemplate",
                "DataTemplate",
                "ItemsPanelTemplate",
                "HierarchicalDataTemplate",
            ]),
            setters: names(&["Setter", "EventSetter"]),
            triggers: names(&[
                "Trigger",
                "DataTrigger",
                "MultiTrigger",
                "MultiDataTrigger",
                "EventTrigger",
            ]),
            event_triggers: names(&["EventTrigger"]),
            conditions: names(&["Condition"]),
        }
    }
}

impl StyleVocabulary {
    /// Block opened by an element with this local name, if any.
    pub fn block_kind(&self, local_name: &str) -> Option<BlockKind> {
        if contains(&self.style_blocks, local_name) {
            Some(BlockKind::Style)
        } else if contains(&self.template_blocks, local_name) {
            Some(BlockKind::Template)
        } else {
            None
        }
    }

    pub fn is_setter(&self, local_name: &str) -> bool {
        contains(&self.setters, local_name)
    }

    pub fn is_trigger(&self, local_name: &str) -> bool {
        contains(&self.triggers, local_name)
    }

    pub fn is_event_trigger(&self, local_name: &str) -> bool {
        contains(&self.event_triggers, local_name)
    }

    pub fn is_condition(&self, local_name: &str) -> bool {
        contains(&self.conditions, local_name)
    }

    /// Elements whose `Property`/`Value` attributes are reinterpreted.
    pub fn is_overlay_element(&self, local_name: &str) -> bool {
        self.is_setter(local_name) || self.is_trigger(local_name) || self.is_condition(local_name)
    }
}

fn contains(list: &[String], name: &str) -> bool {
    list.iter().any(|n| n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Block tests ====================

    #[test]
    fn test_default_blocks() {
        let vocab = StyleVocabulary::default();
        assert_eq!(vocab.block_kind("Style"), Some(BlockKind::Style));
        assert_eq!(vocab.block_kind("DataTemplate"), Some(BlockKind::Template));
        assert_eq!(vocab.block_kind("Button"), None);
    }

    // ==================== Overlay tests ====================

    #[test]
    fn test_overlay_elements() {
        let vocab = StyleVocabulary::default();
        assert!(vocab.is_overlay_element("Setter"));
        assert!(vocab.is_overlay_element("MultiDataTrigger"));
        assert!(vocab.is_overlay_element("Condition"));
        assert!(!vocab.is_overlay_element("Border"));
        assert!(vocab.is_event_trigger("EventTrigger"));
        assert!(!vocab.is_event_trigger("Trigger"));
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocab = StyleVocabulary {
            style_blocks: vec!["Theme".into()],
            ..Default::default()
        };
        assert_eq!(vocab.block_kind("Theme"), Some(BlockKind::Style));
        assert_eq!(vocab.block_kind("Style"), None);
    }
}
