//! Multi-step form drawers as plain state machines.
//!
//! A drawer walks through the steps of its [`Steps`] type. Validation happens
//! outside; events carry its outcome, so [`DrawerState::transition`] stays a
//! pure function of `(state, event)`.

use types::validation::ValidationErrors;

/// The ordered steps of a drawer.
pub trait Steps: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn title(self) -> &'static str;

    fn first() -> Self {
        Self::ALL[0]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    fn is_last(self) -> bool {
        self.index() + 1 == Self::ALL.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DrawerState<S> {
    #[default]
    Closed,
    Editing {
        step: S,
        errors: ValidationErrors,
    },
    Submitting {
        step: S,
    },
    Failed {
        step: S,
        message: String,
    },
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerEvent {
    Open,
    /// Advance, with the validation result of the current step.
    Next { errors: ValidationErrors },
    Back,
    /// Submit from the last step, with the validation result of the whole form.
    Submit { errors: ValidationErrors },
    Succeeded,
    Failed(String),
    Close,
}

impl<S: Steps> DrawerState<S> {
    pub fn is_open(&self) -> bool {
        !matches!(self, DrawerState::Closed | DrawerState::Completed)
    }

    pub fn step(&self) -> Option<S> {
        match self {
            DrawerState::Editing { step, .. }
            | DrawerState::Submitting { step }
            | DrawerState::Failed { step, .. } => Some(*step),
            DrawerState::Closed | DrawerState::Completed => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            DrawerState::Editing { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, DrawerState::Submitting { .. })
    }

    pub fn transition(self, event: DrawerEvent) -> Self {
        use DrawerEvent as E;

        match (self, event) {
            (DrawerState::Submitting { .. }, E::Succeeded) => DrawerState::Completed,
            (DrawerState::Submitting { step }, E::Failed(message)) => {
                DrawerState::Failed { step, message }
            }
            (state @ DrawerState::Submitting { .. }, _) => state,

            (_, E::Close) => DrawerState::Closed,

            (DrawerState::Closed | DrawerState::Completed, E::Open) => DrawerState::Editing {
                step: S::first(),
                errors: ValidationErrors::default(),
            },

            (
                DrawerState::Editing { step, .. } | DrawerState::Failed { step, .. },
                E::Next { errors },
            ) => {
                if !errors.is_empty() {
                    return DrawerState::Editing { step, errors };
                }
                DrawerState::Editing {
                    step: step.next().unwrap_or(step),
                    errors,
                }
            }

            (DrawerState::Editing { step, .. } | DrawerState::Failed { step, .. }, E::Back) => {
                DrawerState::Editing {
                    step: step.previous().unwrap_or(step),
                    errors: ValidationErrors::default(),
                }
            }

            (
                DrawerState::Editing { step, .. } | DrawerState::Failed { step, .. },
                E::Submit { errors },
            ) if step.is_last() => {
                if errors.is_empty() {
                    DrawerState::Submitting { step }
                } else {
                    DrawerState::Editing { step, errors }
                }
            }

            (state, _) => state,
        }
    }
}

/// Steps of the create-user drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreateUserStep {
    Account,
    Placement,
    Review,
}

impl Steps for CreateUserStep {
    const ALL: &'static [Self] = &[
        CreateUserStep::Account,
        CreateUserStep::Placement,
        CreateUserStep::Review,
    ];

    fn title(self) -> &'static str {
        match self {
            CreateUserStep::Account => "Account",
            CreateUserStep::Placement => "Branch",
            CreateUserStep::Review => "Review",
        }
    }
}

impl CreateUserStep {
    /// Form fields edited on this step.
    pub fn fields(self) -> &'static [&'static str] {
        use types::forms::user_fields;

        match self {
            CreateUserStep::Account => &[user_fields::NAME, user_fields::USERNAME, user_fields::EMAIL],
            CreateUserStep::Placement => &[user_fields::BRANCH],
            CreateUserStep::Review => &[],
        }
    }
}
