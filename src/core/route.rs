//! Dashboard pages reachable from the sidebar. Only `Messages` is built out;
//! the rest render an under-construction placeholder.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    Dashboard,
    Profile,
    #[default]
    Messages,
    Finance,
    Center,
}

impl Route {
    /// Sidebar order.
    pub const ALL: [Route; 5] = [
        Route::Dashboard,
        Route::Profile,
        Route::Messages,
        Route::Finance,
        Route::Center,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Profile => "Profile",
            Route::Messages => "Messages",
            Route::Finance => "Finance & Subscriptions",
            Route::Center => "Center Details",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Provider Dashboard",
            Route::Profile => "Center Profile",
            Route::Messages => "Messages",
            Route::Finance => "Finance & Subscriptions",
            Route::Center => "Center Details",
        }
    }

    /// Page subtitle. The dashboard greets the operator by first name.
    pub fn subtitle(&self, operator_name: &str) -> String {
        match self {
            Route::Dashboard => {
                let first = operator_name.split_whitespace().next().unwrap_or("");
                format!("Welcome back, {first}")
            }
            Route::Profile => {
                "Manage your internal center profile, programs, and staff".to_string()
            }
            Route::Messages => "Chat with parents and ChildrenKARE support".to_string(),
            Route::Finance => "Manage billing, payments, and subscription plans".to_string(),
            Route::Center => "Preview your public-facing center listing".to_string(),
        }
    }

    pub fn is_built(&self) -> bool {
        matches!(self, Route::Messages)
    }

    pub fn index(&self) -> usize {
        Route::ALL.iter().position(|r| r == self).unwrap_or(0)
    }
}
