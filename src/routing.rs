use std::fmt;

use crate::models::{ResultKind, SearchResultItem};

/// Segment written in place of a unit's missing parent course.
const MISSING_SEGMENT: &str = "undefined";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Course { id: String },
    Unit { course_id: Option<String>, id: String },
    Lesson { id: String },
    Home,
}

impl Route {
    pub fn for_item(item: &SearchResultItem) -> Self {
        match item.kind {
            ResultKind::Course => Route::Course {
                id: item.id.clone(),
            },
            ResultKind::Unit => Route::Unit {
                course_id: item.parent_id.clone(),
                id: item.id.clone(),
            },
            ResultKind::Lesson => Route::Lesson {
                id: item.id.clone(),
            },
            ResultKind::Other => Route::Home,
        }
    }

    /// False for a unit whose parent course is unknown.
    pub fn is_well_formed(&self) -> bool {
        !matches!(self, Route::Unit { course_id: None, .. })
    }

    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Course { id } => write!(f, "/courses/{id}"),
            Route::Unit { course_id, id } => write!(
                f,
                "/courses/{}/unit/{id}",
                course_id.as_deref().unwrap_or(MISSING_SEGMENT)
            ),
            Route::Lesson { id } => write!(f, "/lessons/{id}"),
            Route::Home => write!(f, "/"),
        }
    }
}

/// Receives the route of a selected search result.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Prints the destination instead of navigating, used by the terminal driver.
pub struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&self, route: &Route) {
        log::info!("Navigating to {}", route);
        println!("-> {}", route.path());
    }
}
