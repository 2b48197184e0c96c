//! Four-level modal navigation as an explicit finite-state machine.
//!
//! Every transition is a pure function from the current [`Navigation`] record and an intent to
//! the next record; the orchestrator only commits the result once the caches it depends on are
//! fresh.

use serde::{Deserialize, Serialize};

use super::domain::{ConfigurationId, ItemId};

/// Editing context presented by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Closed,
    Configuration,
    ItemList,
    ItemDetail,
    ValueList,
}

impl Screen {
    pub const fn label(self) -> &'static str {
        match self {
            Screen::Closed => "closed",
            Screen::Configuration => "configuration",
            Screen::ItemList => "item_list",
            Screen::ItemDetail => "item_detail",
            Screen::ValueList => "value_list",
        }
    }
}

/// Selection carried into the active view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    pub configuration_id: Option<ConfigurationId>,
    pub item_id: Option<ItemId>,
}

impl NavigationContext {
    pub fn for_configuration(configuration_id: Option<ConfigurationId>) -> Self {
        Self {
            configuration_id,
            item_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.configuration_id.is_none() && self.item_id.is_none()
    }
}

/// Navigation-level intents, including the save completions that drive forward edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    NewConfiguration,
    EditConfiguration(ConfigurationId),
    ViewItems(ConfigurationId),
    ConfigurationSaved {
        id: ConfigurationId,
        created: bool,
    },
    NewItem,
    EditItem(ItemId),
    ItemSaved,
    OpenValues(ItemId),
    ValueSaved,
    Back,
    Close,
}

impl NavigationIntent {
    pub const fn label(&self) -> &'static str {
        match self {
            NavigationIntent::NewConfiguration => "new_configuration",
            NavigationIntent::EditConfiguration(_) => "edit_configuration",
            NavigationIntent::ViewItems(_) => "view_items",
            NavigationIntent::ConfigurationSaved { .. } => "configuration_saved",
            NavigationIntent::NewItem => "new_item",
            NavigationIntent::EditItem(_) => "edit_item",
            NavigationIntent::ItemSaved => "item_saved",
            NavigationIntent::OpenValues(_) => "open_values",
            NavigationIntent::ValueSaved => "value_saved",
            NavigationIntent::Back => "back",
            NavigationIntent::Close => "close",
        }
    }
}

/// Side effect the caller must run alongside a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEffect {
    RefreshConfigurations,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("'{intent}' is not available from the {screen} view")]
    IntentNotAllowed {
        intent: &'static str,
        screen: &'static str,
    },
    #[error("'{intent}' requires a selected configuration")]
    MissingConfiguration { intent: &'static str },
}

/// Result of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Navigation,
    pub effect: Option<NavigationEffect>,
}

impl Transition {
    fn to(next: Navigation) -> Self {
        Self { next, effect: None }
    }

    fn with_refresh(next: Navigation) -> Self {
        Self {
            next,
            effect: Some(NavigationEffect::RefreshConfigurations),
        }
    }
}

/// Immutable snapshot of the active screen, back stack, and context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    screen: Screen,
    stack: Vec<Screen>,
    context: NavigationContext,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::closed()
    }
}

impl Navigation {
    pub fn closed() -> Self {
        Self {
            screen: Screen::Closed,
            stack: Vec::new(),
            context: NavigationContext::default(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    pub fn is_closed(&self) -> bool {
        self.screen == Screen::Closed
    }

    /// `ItemList` is the anchor view after a configuration save; it never offers back.
    pub fn back_available(&self) -> bool {
        !self.stack.is_empty() && self.screen != Screen::ItemList
    }

    pub fn title(&self) -> &'static str {
        match self.screen {
            Screen::Closed => "",
            Screen::Configuration if self.context.configuration_id.is_some() => {
                "Edit Configuration"
            }
            Screen::Configuration => "New Configuration",
            Screen::ItemList => "Scoring Fields",
            Screen::ItemDetail if self.context.item_id.is_some() => "Edit Field",
            Screen::ItemDetail => "New Field",
            Screen::ValueList => "Field Values",
        }
    }

    pub fn apply(&self, intent: &NavigationIntent) -> Result<Transition, NavigationError> {
        match (self.screen, intent) {
            (_, NavigationIntent::Back) => Ok(self.back()),
            (_, NavigationIntent::Close) => Ok(Transition::with_refresh(Self::closed())),

            (Screen::Closed, NavigationIntent::NewConfiguration) => Ok(Transition::to(Self {
                screen: Screen::Configuration,
                stack: Vec::new(),
                context: NavigationContext::for_configuration(None),
            })),
            (Screen::Closed, NavigationIntent::EditConfiguration(id)) => Ok(Transition::to(Self {
                screen: Screen::Configuration,
                stack: Vec::new(),
                context: NavigationContext::for_configuration(Some(id.clone())),
            })),
            (Screen::Closed, NavigationIntent::ViewItems(id)) => Ok(Transition::to(Self {
                screen: Screen::ItemList,
                stack: Vec::new(),
                context: NavigationContext::for_configuration(Some(id.clone())),
            })),

            (Screen::Configuration, NavigationIntent::ConfigurationSaved { id, created }) => {
                if *created {
                    Ok(Transition::to(Self {
                        screen: Screen::ItemList,
                        stack: Vec::new(),
                        context: NavigationContext::for_configuration(Some(id.clone())),
                    }))
                } else {
                    Ok(Transition::to(Self::closed()))
                }
            }

            (Screen::ItemList, NavigationIntent::NewItem) => {
                self.push_from_items(intent, Screen::ItemDetail, None)
            }
            (Screen::ItemList, NavigationIntent::EditItem(id)) => {
                self.push_from_items(intent, Screen::ItemDetail, Some(id.clone()))
            }
            (Screen::ItemList, NavigationIntent::OpenValues(id)) => {
                self.push_from_items(intent, Screen::ValueList, Some(id.clone()))
            }

            (Screen::ItemDetail, NavigationIntent::ItemSaved)
            | (Screen::ValueList, NavigationIntent::ValueSaved) => Ok(self.return_to_items()),

            (screen, intent) => Err(NavigationError::IntentNotAllowed {
                intent: intent.label(),
                screen: screen.label(),
            }),
        }
    }

    fn back(&self) -> Transition {
        let mut stack = self.stack.clone();
        match stack.pop() {
            Some(previous) => {
                let context = if previous == Screen::ItemList {
                    NavigationContext::for_configuration(self.context.configuration_id.clone())
                } else {
                    self.context.clone()
                };
                Transition::to(Self {
                    screen: previous,
                    stack,
                    context,
                })
            }
            None => Transition::with_refresh(Self::closed()),
        }
    }

    fn push_from_items(
        &self,
        intent: &NavigationIntent,
        screen: Screen,
        item_id: Option<ItemId>,
    ) -> Result<Transition, NavigationError> {
        let configuration_id = self
            .context
            .configuration_id
            .clone()
            .ok_or(NavigationError::MissingConfiguration {
                intent: intent.label(),
            })?;

        let mut stack = self.stack.clone();
        stack.push(Screen::ItemList);
        Ok(Transition::to(Self {
            screen,
            stack,
            context: NavigationContext {
                configuration_id: Some(configuration_id),
                item_id,
            },
        }))
    }

    /// Fixed destination: drop the frame pushed on the way in instead of restoring it.
    fn return_to_items(&self) -> Transition {
        let mut stack = self.stack.clone();
        if stack.last() == Some(&Screen::ItemList) {
            stack.pop();
        }
        Transition::to(Self {
            screen: Screen::ItemList,
            stack,
            context: NavigationContext::for_configuration(self.context.configuration_id.clone()),
        })
    }
}
