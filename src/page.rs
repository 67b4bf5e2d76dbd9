//! The contact page, built from the link builder output. One
//! parameterized page covers both deployment styles; see
//! `ContactPageOptions`.

use std::sync::Arc;

use anyhow::{bail, Result};
use rouille::Response;

use crate::arequest::ARequest;
use crate::contact::{ContactLinks, ContactPageOptions, PageParams};
use crate::handler::{ExactFnHandler, Handler};
use crate::html::{a, att, body, div, empty_node, h1, head, html, li, link, main,
                  meta, p, span, text, title, ul, Node};
use crate::http_request_method::HttpRequestMethodSimple;
use crate::http_response_status_codes::HttpResponseStatusCode;
use crate::webutils::htmlresponse;

pub struct ContactLayout {
    pub site_name: &'static str,
    pub page_title: &'static str,
    pub tagline: &'static str,
    pub stylesheet_href: &'static str,
}

pub static DEFAULT_LAYOUT: ContactLayout = ContactLayout {
    site_name: "Connect 360 Degree",
    page_title: "Contact Owner",
    tagline: "Choose any option below to connect instantly.",
    stylesheet_href: "/static/main.css",
};

impl ContactLayout {
    /// Build a whole HTML page around the given card contents.
    pub fn page(&self, card: Node) -> Node {
        html(
            [],
            [
                head(
                    [],
                    [
                        meta([att("charset", "utf-8")]),
                        meta([att("name", "viewport"),
                              att("content", "width=device-width, initial-scale=1")]),
                        link([att("rel", "stylesheet"),
                              att("href", self.stylesheet_href)]),
                        title([], [text(format!("{} | {}",
                                                self.page_title, self.site_name))]),
                    ]),
                body(
                    [],
                    [
                        main([att("class", "page")],
                             [div([att("class", "card")], [card])])
                    ]),
            ])
    }
}

/// One tappable action row: an anchor with a label plus hint.
fn action_button(href: &str, aria_label: &str, label: &str, class: &str) -> Node {
    a([att("href", href),
       att("aria-label", aria_label),
       att("class", format!("action {class}"))],
      [
          span([att("class", "action-label")], [text(label)]),
          span([att("class", "action-hint")], [text("Tap to connect")]),
      ])
}

fn quick_contact_block(options: &ContactPageOptions, links: &ContactLinks) -> Node {
    let stack_class = if options.enable_whatsapp {
        // three-button vertical stack
        "actions actions-stack"
    } else {
        // two-button grid
        "actions actions-grid"
    };
    div([att("class", "quick-contact")],
        [
            p([att("class", "section-label")], [text("Quick Contact")]),
            div([att("class", stack_class)],
                [
                    action_button(&links.call, "Call owner", "Call", "action-call"),
                    action_button(&links.sms, "Message owner", "Message", "action-sms"),
                    match &links.whatsapp {
                        Some(whatsapp) =>
                            action_button(whatsapp, "WhatsApp owner", "WhatsApp",
                                          "action-whatsapp"),
                        None => empty_node()
                    },
                ]),
        ])
}

fn sponsor_block(params: &PageParams) -> Node {
    div([att("class", "sponsor")],
        [
            p([att("class", "sponsor-label")], [text(&params.sponsor_label)]),
            div([att("class", "sponsor-slot")], [text("Sponsored company logo")]),
        ])
}

fn privacy_block() -> Node {
    div([att("class", "privacy")],
        [
            p([att("class", "privacy-title")], [text("Privacy & Security")]),
            ul([att("class", "privacy-list")],
               [
                   li([], [text("Privacy is protected: both owner and caller \
                                 numbers are hidden.")]),
                   li([], [text("No phone numbers are shared on this page, and \
                                 contact happens through secure call/message \
                                 actions only.")]),
               ]),
        ])
}

/// The full card, pure in its inputs; tests render this without a
/// server.
pub fn contact_page(
    layout: &ContactLayout,
    options: &ContactPageOptions,
    params: &PageParams,
    links: &ContactLinks,
) -> Node {
    layout.page(div(
        [],
        [
            div([att("class", "card-header")],
                [
                    p([att("class", "site-name")], [text(layout.site_name)]),
                    h1([], [text(layout.page_title)]),
                    p([att("class", "tagline")], [text(layout.tagline)]),
                    p([att("class", "owner")],
                      [text(format!("Owner: {}", params.owner))]),
                ]),
            quick_contact_block(options, links),
            div([att("class", "emergency")],
                [a([att("href", &links.emergency),
                    att("aria-label", "Emergency contact"),
                    att("class", "emergency-button")],
                   [text("Emergency Contact")])]),
            sponsor_block(params),
            privacy_block(),
        ]))
}

/// Make a `Handler` rendering the contact page with the given
/// options. Display parameters come from the request's query string
/// on every call.
pub fn contactpage_handler(
    options: ContactPageOptions,
    layout: &'static ContactLayout,
) -> Arc<dyn Handler> {
    Arc::new(ExactFnHandler::new(
        move |request: &ARequest, method: HttpRequestMethodSimple|
              -> Result<Response>
        {
            if method.is_post() {
                bail!("can't POST to the contact page");
            }
            let query = request.query()?;
            let params = PageParams::from_query(&query);
            let links = ContactLinks::build(&options, &params);
            htmlresponse(HttpResponseStatusCode::OK200, || {
                Ok(contact_page(layout, &options, &params, &links))
            })
        }
    ))
}
