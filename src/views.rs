// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-rendered HTML pages.
//!
//! Pages are minijinja templates compiled into the binary. Each one extends
//! `layout.html`, which draws the navigation bar for the current page set
//! and an optional status notice. HTML auto-escaping is on for every
//! template.

use axum::response::Html;
use minijinja::{context, AutoEscape, Environment, UndefinedBehavior, Value};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{ProfileInfo, TodoItem};
use crate::routes::PageSet;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("signup.html", include_str!("../templates/signup.html")),
    ("reset.html", include_str!("../templates/reset.html")),
    ("logout.html", include_str!("../templates/logout.html")),
    ("profile.html", include_str!("../templates/profile.html")),
    ("todos.html", include_str!("../templates/todos.html")),
    ("error.html", include_str!("../templates/error.html")),
];

/// Status message shown above a page body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "class", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Warning(msg) | Notice::Error(msg) => msg.as_str(),
        }
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::Validation(_) => Notice::Warning(err.user_message()),
            _ => Notice::Error(err.user_message()),
        }
    }
}

#[derive(Serialize)]
struct NavGroup {
    heading: Option<&'static str>,
    links: Vec<NavLink>,
}

#[derive(Serialize)]
struct NavLink {
    /// Route constant; marked safe so `/` is not entity-encoded.
    path: Value,
    title: &'static str,
    active: bool,
}

fn navigation(set: PageSet, active: &str) -> Vec<NavGroup> {
    let mut groups: Vec<NavGroup> = Vec::new();
    for page in set.pages() {
        let link = NavLink {
            path: Value::from_safe_string(page.path.to_string()),
            title: page.title,
            active: page.path == active,
        };
        match groups.last_mut() {
            Some(group) if group.heading == page.section => group.links.push(link),
            _ => groups.push(NavGroup {
                heading: page.section,
                links: vec![link],
            }),
        }
    }
    groups
}

#[derive(Serialize)]
struct TodoRow<'a> {
    id: &'a str,
    text: &'a str,
    done: bool,
}

/// Compiled page templates, shared by all requests.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render `name` inside the layout.
    fn render(
        &self,
        name: &str,
        nav: Vec<NavGroup>,
        title: &str,
        notice: Option<&Notice>,
        page: Value,
    ) -> Result<Html<String>, AppError> {
        let html = self
            .env
            .get_template(name)?
            .render(context! { title, nav, notice, ..page })?;
        Ok(Html(html))
    }

    // ─── Unauthenticated pages ───────────────────────────────────

    pub fn home_page(&self, notice: Option<&Notice>) -> Result<Html<String>, AppError> {
        let nav = navigation(PageSet::Unauthenticated, "/");
        self.render("home.html", nav, "To-do app overview", notice, context! {})
    }

    pub fn login_page(&self, email: &str, notice: Option<&Notice>) -> Result<Html<String>, AppError> {
        let nav = navigation(PageSet::Unauthenticated, "/login");
        self.render("login.html", nav, "Log in", notice, context! { email })
    }

    pub fn signup_page(&self, email: &str, notice: Option<&Notice>) -> Result<Html<String>, AppError> {
        let nav = navigation(PageSet::Unauthenticated, "/signup");
        self.render("signup.html", nav, "Sign up", notice, context! { email })
    }

    pub fn reset_page(&self, email: &str, notice: Option<&Notice>) -> Result<Html<String>, AppError> {
        let nav = navigation(PageSet::Unauthenticated, "/reset");
        self.render("reset.html", nav, "Reset password", notice, context! { email })
    }

    // ─── Authenticated pages ─────────────────────────────────────

    pub fn logout_page(&self, email: &str) -> Result<Html<String>, AppError> {
        let nav = navigation(PageSet::Authenticated, "/logout");
        self.render("logout.html", nav, "Log out", None, context! { email })
    }

    pub fn profile_page(
        &self,
        profile: Option<&ProfileInfo>,
        notice: Option<&Notice>,
    ) -> Result<Html<String>, AppError> {
        let profile_json = profile.and_then(|info| serde_json::to_string_pretty(info).ok());
        let nav = navigation(PageSet::Authenticated, "/profile");
        self.render("profile.html", nav, "Profile", notice, context! { profile_json })
    }

    pub fn todo_page(
        &self,
        items: &[TodoItem],
        notice: Option<&Notice>,
    ) -> Result<Html<String>, AppError> {
        let items: Vec<TodoRow<'_>> = items
            .iter()
            .map(|item| TodoRow {
                id: &item.id,
                text: &item.text,
                done: item.done,
            })
            .collect();
        let nav = navigation(PageSet::Authenticated, "/todos");
        self.render("todos.html", nav, "My to-dos", notice, context! { items })
    }

    /// Page for errors that escape a handler. Drawn without navigation.
    pub fn error_page(&self, notice: &Notice) -> Result<Html<String>, AppError> {
        self.render("error.html", Vec::new(), "Error", Some(notice), context! {})
    }
}
