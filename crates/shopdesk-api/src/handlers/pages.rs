//! Dashboard pages
//!
//! Every page shares the same shell (title plus navigation) and renders its
//! own body. Content is static; data is loaded by the browser.

use crate::constants::{API_PREFIX, USER_ID_HEADER};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Reviews,
    Surveys,
    Products,
    AddProduct,
    PackageInserts,
}

impl Page {
    /// Pages listed in the navigation, in display order
    pub const NAV: [Page; 5] = [
        Page::Overview,
        Page::Reviews,
        Page::Surveys,
        Page::Products,
        Page::PackageInserts,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Overview => "/",
            Page::Reviews => "/reviews",
            Page::Surveys => "/surveys",
            Page::Products => "/products",
            Page::AddProduct => "/products/new",
            Page::PackageInserts => "/package-inserts",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Reviews => "Reviews",
            Page::Surveys => "Surveys",
            Page::Products => "Products",
            Page::AddProduct => "Add Product",
            Page::PackageInserts => "Package Inserts",
        }
    }

    fn body(self) -> String {
        match self {
            Page::Overview => concat!(
                "<section id=\"overview\">",
                "<p>Track reviews, survey responses and giveaway claims across your marketplaces.</p>",
                "<ul class=\"stats\">",
                "<li data-stat=\"reviews\">Reviews</li>",
                "<li data-stat=\"surveys\">Survey responses</li>",
                "<li data-stat=\"products\">Products</li>",
                "</ul></section>"
            )
            .to_string(),
            Page::Reviews => concat!(
                "<section id=\"reviews\">",
                "<p>Reviews collected from customers after they claim a giveaway.</p>",
                "<table class=\"reviews\"><thead><tr>",
                "<th>Product</th><th>Rating</th><th>Review</th><th>Date</th>",
                "</tr></thead><tbody></tbody></table></section>"
            )
            .to_string(),
            Page::Surveys => concat!(
                "<section id=\"surveys\">",
                "<p>Questions shown to customers before they receive their giveaway.</p>",
                "<table class=\"surveys\"><thead><tr>",
                "<th>Question</th><th>Responses</th>",
                "</tr></thead><tbody></tbody></table></section>"
            )
            .to_string(),
            Page::Products => format!(
                concat!(
                    "<section id=\"products\">",
                    "<a class=\"button\" href=\"{}\">Add product</a>",
                    "<table class=\"products\"><thead><tr>",
                    "<th>Image</th><th>Name</th><th>Marketplace</th><th>Giveaway</th>",
                    "</tr></thead><tbody></tbody></table></section>"
                ),
                Page::AddProduct.path()
            ),
            // No `action`: the endpoint needs the user header, so the page
            // script posts the form itself
            Page::AddProduct => format!(
                concat!(
                    "<section id=\"add-product\">",
                    "<form id=\"add-product-form\" data-endpoint=\"{}/products\" ",
                    "data-user-header=\"{}\" enctype=\"multipart/form-data\">",
                    "<label>Product name <input name=\"name\" required></label>",
                    "<label>Marketplace <select name=\"marketplace\" required>",
                    "<option value=\"amazon\">Amazon</option>",
                    "<option value=\"walmart\">Walmart</option>",
                    "<option value=\"etsy\">Etsy</option>",
                    "</select></label>",
                    "<label>Marketplace product ID <input name=\"marketplace_product_id\" required></label>",
                    "<label>Giveaway <input name=\"giveaway\" required></label>",
                    "<label>Product image <input type=\"file\" name=\"image\" accept=\"image/*\" required></label>",
                    "<button type=\"submit\">Create product</button>",
                    "</form></section>"
                ),
                API_PREFIX,
                USER_ID_HEADER
            ),
            Page::PackageInserts => concat!(
                "<section id=\"package-inserts\">",
                "<p>Printable inserts that point customers to your giveaway page.</p>",
                "<div class=\"inserts\"></div></section>"
            )
            .to_string(),
        }
    }

    pub fn render(self) -> Html<String> {
        let nav = Page::NAV
            .iter()
            .map(|page| {
                let class = if *page == self || (self == Page::AddProduct && *page == Page::Products) {
                    " class=\"active\""
                } else {
                    ""
                };
                format!("<a href=\"{}\"{}>{}</a>", page.path(), class, page.title())
            })
            .collect::<Vec<_>>()
            .join("");

        Html(format!(
            concat!(
                "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">",
                "<title>{title} | Shopdesk</title></head>",
                "<body><nav>{nav}</nav><main><h1>{title}</h1>{body}</main></body></html>"
            ),
            title = self.title(),
            nav = nav,
            body = self.body()
        ))
    }
}

pub async fn overview() -> Html<String> {
    Page::Overview.render()
}

pub async fn reviews() -> Html<String> {
    Page::Reviews.render()
}

pub async fn surveys() -> Html<String> {
    Page::Surveys.render()
}

pub async fn products() -> Html<String> {
    Page::Products.render()
}

pub async fn add_product() -> Html<String> {
    Page::AddProduct.render()
}

pub async fn package_inserts() -> Html<String> {
    Page::PackageInserts.render()
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(concat!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">",
            "<title>Not Found | Shopdesk</title></head>",
            "<body><main><h1>Page not found</h1><a href=\"/\">Back to overview</a></main></body></html>"
        )),
    )
}
