//! Navigation pages exposed by the application.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Page {
    pub key: &'static str,
    pub title: &'static str,
    /// Route prefix serving the page's actions.
    pub route: &'static str,
    pub requires_login: bool,
}

pub static PAGES: [Page; 9] = [
    Page {
        key: "login",
        title: "Login/Register",
        route: "/auth",
        requires_login: false,
    },
    Page {
        key: "water",
        title: "Water Intake Tracker",
        route: "/water",
        requires_login: true,
    },
    Page {
        key: "nutrition",
        title: "Nutrition Analyzer",
        route: "/nutrition",
        requires_login: true,
    },
    Page {
        key: "exercise",
        title: "Exercise Tip",
        route: "/exercise",
        requires_login: true,
    },
    Page {
        key: "medicine",
        title: "AI Medicine Dashboard",
        route: "/medicines",
        requires_login: true,
    },
    Page {
        key: "hospitals",
        title: "Nearby Hospitals",
        route: "/hospitals",
        requires_login: true,
    },
    Page {
        key: "assistant",
        title: "AI Health Assistant",
        route: "/assistant",
        requires_login: true,
    },
    Page {
        key: "diet",
        title: "AI Diet Planner",
        route: "/diet",
        requires_login: true,
    },
    Page {
        key: "meal_plan",
        title: "AI Meal Planner",
        route: "/meal-plan",
        requires_login: true,
    },
];

pub fn find(key: &str) -> Option<&'static Page> {
    PAGES.iter().find(|p| p.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        for (i, page) in PAGES.iter().enumerate() {
            assert!(PAGES[i + 1..].iter().all(|p| p.key != page.key));
        }
        assert_eq!(find("water").map(|p| p.title), Some("Water Intake Tracker"));
        assert!(find("settings").is_none());
    }
}
