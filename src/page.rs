//! Server-rendered product grid.

// self
use crate::{
	catalog::{Catalog, CatalogItem},
	config::StorefrontConfig,
};

/// Notice shown when the catalog is empty or could not be loaded.
pub const EMPTY_NOTICE: &str =
	"No items found right now or there was an error loading data. Try again later.";

const FOOTER: &str =
	"Inventory, prices &amp; quantities are pulled live from eBay and update as items sell.";
const STYLE: &str = "\
body{margin:0;font-family:system-ui,-apple-system,BlinkMacSystemFont,\"Segoe UI\",sans-serif;\
background:#0b0b10;color:#f5f5f7;min-height:100vh}\
header{padding:1.5rem 1rem;text-align:center;border-bottom:1px solid #222}\
h1{margin:0;font-size:1.8rem}\
.tagline{margin-top:.4rem;font-size:.95rem;color:#aaa}\
main{max-width:1100px;margin:1.5rem auto 3rem;padding:0 1rem}\
.empty{text-align:center;margin:1.5rem 0;color:#aaa;font-size:.95rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:1.2rem}\
.card{background:#13131a;border-radius:1rem;padding:.8rem;\
box-shadow:0 10px 25px rgba(0,0,0,.35);display:flex;flex-direction:column}\
.card img{width:100%;border-radius:.8rem;aspect-ratio:1/1;object-fit:cover;background:#1f1f28}\
.body{margin-top:.7rem;display:flex;flex-direction:column;gap:.35rem;flex:1}\
.title{font-size:.95rem;font-weight:600;line-height:1.3}\
.meta{display:flex;justify-content:space-between;align-items:center;font-size:.95rem}\
.price{font-weight:700}\
.qty{font-size:.85rem;color:#bbb}\
.view{margin-top:.5rem;border-radius:999px;padding:.45rem .75rem;font-size:.85rem;\
font-weight:600;text-align:center;text-decoration:none;background:#4b4df5;color:#fff}\
.footer{margin-top:2rem;text-align:center;font-size:.8rem;color:#777}";

/// Renders the full catalog page.
pub fn render(storefront: &StorefrontConfig, catalog: &Catalog) -> String {
	let title = escape_html(&storefront.title);
	let mut html = format!(
		"<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
		 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
		 <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
		 <header><h1>{title}</h1><p class=\"tagline\">{tagline}</p></header>\n<main>\n",
		tagline = escape_html(&storefront.tagline),
	);

	if catalog.is_empty() {
		html.push_str(&format!("<div class=\"empty\">{EMPTY_NOTICE}</div>\n"));
	} else {
		html.push_str("<div class=\"grid\">\n");

		for item in &catalog.items {
			html.push_str(&render_card(item));
		}

		html.push_str("</div>\n");
	}

	html.push_str(&format!("<p class=\"footer\">{FOOTER}</p>\n</main>\n</body>\n</html>\n"));

	html
}

fn render_card(item: &CatalogItem) -> String {
	let title = item.title.as_deref().unwrap_or_default();
	let alt = if title.is_empty() { "Item" } else { title };
	let price = item.price_label().unwrap_or_else(|| "See price on eBay".into());
	let quantity = item.quantity.map(|qty| format!("Qty: {qty}")).unwrap_or_default();

	format!(
		"<article class=\"card\">\
		 <img src=\"{image}\" alt=\"{alt}\" loading=\"lazy\">\
		 <div class=\"body\">\
		 <div class=\"title\">{title}</div>\
		 <div class=\"meta\"><div class=\"price\">{price}</div><div class=\"qty\">{quantity}</div></div>\
		 <a class=\"view\" href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">View on eBay</a>\
		 </div></article>\n",
		image = escape_html(item.image.as_deref().unwrap_or_default()),
		alt = escape_html(alt),
		title = escape_html(title),
		price = escape_html(&price),
		url = escape_html(item.url.as_deref().unwrap_or("#")),
	)
}

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape_html(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());

	for c in value.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(c),
		}
	}

	escaped
}
