use chrono::Datelike;
use lostfound_types::{StatusFilter, View};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::pages::PageState;
use crate::state::SiteContext;

/// Templates are compiled into the binary. Names ending in `.html` get
/// HTML auto-escaping.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("submit.html", include_str!("../templates/submit.html")),
    ("reports.html", include_str!("../templates/reports.html")),
    ("contact.html", include_str!("../templates/contact.html")),
];

pub struct Renderer {
    env: Environment<'static>,
}

#[derive(Debug, Serialize)]
struct NavItem {
    param: &'static str,
    title: &'static str,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct FilterItem {
    param: &'static str,
    label: &'static str,
    selected: bool,
}

fn template_for(view: View) -> &'static str {
    match view {
        View::Home => "home.html",
        View::Submit => "submit.html",
        View::Reports => "reports.html",
        View::Contact => "contact.html",
    }
}

impl Renderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, site: &SiteContext, page: &PageState) -> Result<String, minijinja::Error> {
        let nav: Vec<NavItem> = View::ALL
            .iter()
            .map(|view| NavItem {
                param: view.param(),
                title: view.title(),
                selected: *view == page.view,
            })
            .collect();

        let filters: Vec<FilterItem> = StatusFilter::ALL
            .iter()
            .map(|status| FilterItem {
                param: status.param(),
                label: status.label(),
                selected: *status == page.status,
            })
            .collect();

        let template = self.env.get_template(template_for(page.view))?;
        template.render(context! {
            site => site,
            page => page,
            title => page.view.title(),
            nav => nav,
            filters => filters,
            year => chrono::Local::now().year(),
        })
    }
}
