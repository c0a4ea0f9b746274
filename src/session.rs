#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Listing,
    Detail(String),
}

/// Per-session state shared by the search and registration pages.
#[derive(Debug, Clone, Default)]
pub struct Session {
    view: View,
    pub steps: StepList,
}

impl Session {
    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn selected_recipe(&self) -> Option<&str> {
        match &self.view {
            View::Listing => None,
            View::Detail(id) => Some(id.as_str()),
        }
    }

    pub fn select(&mut self, recipe_id: String) {
        self.view = View::Detail(recipe_id);
    }

    pub fn back(&mut self) {
        self.view = View::Listing;
    }

    pub fn finish_delete(&mut self, recipe_id: &str) -> bool {
        if self.selected_recipe() == Some(recipe_id) {
            self.view = View::Listing;
            true
        } else {
            false
        }
    }
}

/// Ordered free-text steps entered during registration. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepList {
    steps: Vec<String>,
}

impl Default for StepList {
    fn default() -> Self {
        Self { steps: vec![String::new()] }
    }
}

impl StepList {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.steps
    }

    pub fn push_empty(&mut self) {
        self.steps.push(String::new());
    }

    // The first step is never removable.
    pub fn remove_last(&mut self) -> bool {
        if self.steps.len() <= 1 {
            return false;
        }
        self.steps.pop();
        true
    }

    pub fn set(&mut self, index: usize, value: String) -> bool {
        match self.steps.get_mut(index) {
            Some(step) => {
                *step = value;
                true
            }
            None => false,
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.steps.clone()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
