//! HTML views
//!
//! Plain string templates. Text we produce is escaped; HTML fragments that
//! come from the CMS (`title`, `content`, `excerpt`) are inserted as-is.

use super::{ABOUT_PAGE_SLUG, BLOG_PREFIX, PROVIDERS_PREFIX, SITE_NAME};
use crate::content::{Page, PostDetail, PostSummary, Provider};
use crate::directory::{CategoryFilter, DirectoryState, Listing};
use crate::types::SiteError;

/// Maximum length, in characters, of a meta description
pub const META_DESCRIPTION_LEN: usize = 160;

const DEFAULT_DESCRIPTION: &str =
    "La Igualitària, economat cooperatiu del Poble-sec. Productes locals, de temporada i ecològics.";

const NAV: &[(&str, &str)] = &[
    ("/", "Inici"),
    ("/qui-som", "Qui som"),
    ("/proveidors", "Proveïdors"),
    ("/blog", "Blog"),
    ("/comunitat", "Comunitat"),
    ("/fer-se-soci", "Fes-te sòcia"),
];

/// Escape text for HTML body and attribute context
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Drop every `<...>` run; surrounding text and whitespace are kept as-is
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Tag-free excerpt cut to [`META_DESCRIPTION_LEN`] characters
pub fn meta_description(excerpt_html: &str) -> String {
    strip_tags(excerpt_html)
        .chars()
        .take(META_DESCRIPTION_LEN)
        .collect()
}

/// `"{title} - La Igualitària"`, tags removed
pub fn page_title(title: &str) -> String {
    format!("{} - {}", strip_tags(title), SITE_NAME)
}

/// Wrap a body in the shared document shell
pub fn layout(title: &str, description: &str, body: &str) -> String {
    let nav: String = NAV
        .iter()
        .map(|(href, label)| format!("<li><a href=\"{}\">{}</a></li>", href, escape(label)))
        .collect();

    format!(
        "<!DOCTYPE html>\n<html lang=\"ca\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title}</title>\n<meta name=\"description\" content=\"{description}\">\n</head>\n<body>\n\
<header><nav><a class=\"brand\" href=\"/\">{site}</a><ul>{nav}</ul></nav></header>\n\
<main>\n{body}\n</main>\n\
<footer><p>{site}, economat cooperatiu del Poble-sec</p></footer>\n</body>\n</html>\n",
        title = escape(title),
        description = escape(description),
        site = escape(SITE_NAME),
        nav = nav,
        body = body,
    )
}

fn image(src: Option<&str>, alt: &str) -> String {
    match src {
        Some(src) => format!("<img src=\"{}\" alt=\"{}\">", escape(src), escape(alt)),
        None => String::new(),
    }
}

fn post_card(post: &PostSummary) -> String {
    format!(
        "<article class=\"post-card\">{image}<time datetime=\"{iso}\">{date}</time>\
<h3><a href=\"{prefix}{slug}\">{title}</a></h3><div class=\"excerpt\">{excerpt}</div>\
<a href=\"{prefix}{slug}\">Llegir més →</a></article>",
        image = image(post.featured_image.as_deref(), &strip_tags(&post.title)),
        iso = escape(&post.datetime),
        date = escape(&post.date),
        prefix = BLOG_PREFIX,
        slug = escape(&post.slug),
        title = post.title,
        excerpt = post.excerpt,
    )
}

fn post_list(posts: &[PostSummary]) -> String {
    if posts.is_empty() {
        return "<p>Encara no hi ha cap entrada publicada.</p>".to_string();
    }
    let cards: String = posts.iter().map(post_card).collect();
    format!("<div class=\"posts\">{}</div>", cards)
}

pub fn home(hero: &Page, posts: &[PostSummary]) -> String {
    let body = format!(
        "<section class=\"hero\"><h1>{title}</h1><div class=\"content\">{content}</div>\
<a class=\"cta\" href=\"/fer-se-soci\">Fes-te sòcia</a></section>\n\
<section class=\"blog\"><h2>Des del nostre Blog</h2>{posts}<a href=\"/blog\">Veure totes les entrades</a></section>",
        title = hero.title,
        content = hero.content,
        posts = post_list(posts),
    );
    layout(SITE_NAME, DEFAULT_DESCRIPTION, &body)
}

pub fn blog_index(posts: &[PostSummary]) -> String {
    let body = format!("<h1>Blog</h1>\n{}", post_list(posts));
    layout(&page_title("Blog"), DEFAULT_DESCRIPTION, &body)
}

pub fn post_detail(post: &PostDetail) -> String {
    let alt = post
        .featured_alt
        .clone()
        .unwrap_or_else(|| strip_tags(&post.title));
    let body = format!(
        "<article class=\"post\"><a href=\"/blog\">← Tornar al blog</a>\
<h1>{title}</h1><time datetime=\"{iso}\">{date}</time>{image}\
<div class=\"content\">{content}</div></article>",
        title = post.title,
        iso = escape(&post.datetime),
        date = escape(&post.date),
        image = image(post.featured_image.as_deref(), &alt),
        content = post.content,
    );
    layout(&page_title(&post.title), &meta_description(&post.excerpt), &body)
}

/// Title used when a post slug has no record
pub fn post_not_found() -> String {
    layout("Post no trobat", DEFAULT_DESCRIPTION, &not_found_body())
}

fn facets(state: &DirectoryState, query: &str, active: &CategoryFilter) -> String {
    if matches!(state, DirectoryState::Loading) {
        return String::new();
    }
    state
        .categories()
        .iter()
        .map(|category| {
            let mut href = format!("/proveidors?categoria={}", urlencoding::encode(&category.id));
            if !query.is_empty() {
                href.push_str(&format!("&q={}", urlencoding::encode(query)));
            }
            let class = if category.id == active.id() { " class=\"active\"" } else { "" };
            format!("<a{} href=\"{}\">{}</a>", class, escape(&href), escape(&category.name))
        })
        .collect()
}

fn provider_card(provider: &Provider) -> String {
    let alt = provider
        .featured_alt
        .clone()
        .unwrap_or_else(|| strip_tags(&provider.title));
    let image = match provider.featured_image.as_deref() {
        Some(src) => image(Some(src), &alt),
        None => "<div class=\"no-image\">Sense imatge</div>".to_string(),
    };
    let mut badges = String::new();
    if let Some(tipus) = &provider.acf.tipus {
        badges.push_str(&format!("<span class=\"tipus\">{}</span>", escape(tipus)));
    }
    if let Some(ubicacio) = &provider.acf.ubicacio {
        badges.push_str(&format!("<span class=\"ubicacio\">📍 {}</span>", escape(ubicacio)));
    }

    format!(
        "<a class=\"provider-card\" href=\"{prefix}{slug}\">{image}<h3>{title}</h3>\
<div class=\"badges\">{badges}</div><div class=\"excerpt\">{excerpt}</div>\
<span>Més informació →</span></a>",
        prefix = PROVIDERS_PREFIX,
        slug = escape(&provider.slug),
        image = image,
        title = provider.title,
        badges = badges,
        excerpt = provider.excerpt,
    )
}

/// Directory view for a session state, search query and active facet
pub fn directory(state: &DirectoryState, query: &str, category: &CategoryFilter) -> String {
    let listing = match state.listing(query, category) {
        Listing::Loading => "<p class=\"loading\">Carregant proveïdors...</p>".to_string(),
        Listing::Errored(message) => format!(
            "<p class=\"error\">Error carregant proveïdors: {}</p>",
            escape(message)
        ),
        Listing::NoResults => {
            "<p class=\"empty\">No s'han trobat proveïdors que coincideixin amb la teva cerca.</p>"
                .to_string()
        }
        Listing::Results(providers) => {
            let cards: String = providers.into_iter().map(provider_card).collect();
            format!("<div class=\"providers\">{}</div>", cards)
        }
    };

    let body = format!(
        "<section class=\"hero\"><h1>Els nostres proveïdors</h1>\
<p>Treballem amb productors locals i ecològics que comparteixen els nostres valors de sostenibilitat i justícia social.</p></section>\n\
<form method=\"get\" action=\"/proveidors\"><input type=\"text\" name=\"q\" value=\"{query}\" placeholder=\"Cerca proveïdors...\">\
<input type=\"hidden\" name=\"categoria\" value=\"{category}\"><button type=\"submit\">Cerca</button></form>\n\
<nav class=\"categories\">{facets}</nav>\n{listing}\n\
<section class=\"cta\"><h2>Ets Proveïdor?</h2><p>Si ets productor i estàs interessat en formar part de la nostra xarxa, contacta'ns!</p>\
<a href=\"mailto:laigualitaria@cooperasec.org\">Contacta'ns</a></section>",
        query = escape(query),
        category = escape(category.id()),
        facets = facets(state, query, category),
        listing = listing,
    );
    layout(&page_title("Proveïdors"), DEFAULT_DESCRIPTION, &body)
}

pub fn provider_detail(provider: &Provider) -> String {
    let alt = provider
        .featured_alt
        .clone()
        .unwrap_or_else(|| strip_tags(&provider.title));

    let mut details = String::new();
    if let Some(tipus) = &provider.acf.tipus {
        details.push_str(&format!("<li class=\"tipus\">{}</li>", escape(tipus)));
    }
    if let Some(ubicacio) = &provider.acf.ubicacio {
        details.push_str(&format!("<li class=\"ubicacio\">📍 {}</li>", escape(ubicacio)));
    }
    if let Some(web) = &provider.acf.web {
        details.push_str(&format!(
            "<li class=\"web\"><a href=\"{0}\" rel=\"noopener noreferrer\">{0}</a></li>",
            escape(web)
        ));
    }
    if let Some(email) = &provider.acf.email {
        details.push_str(&format!(
            "<li class=\"email\"><a href=\"mailto:{0}\">{0}</a></li>",
            escape(email)
        ));
    }
    if let Some(telefon) = &provider.acf.telefon {
        details.push_str(&format!(
            "<li class=\"telefon\"><a href=\"tel:{0}\">{0}</a></li>",
            escape(telefon)
        ));
    }

    let body = format!(
        "<article class=\"provider\"><a href=\"/proveidors\">← Tornar als proveïdors</a>\
<h1>{title}</h1>{image}<ul class=\"details\">{details}</ul>\
<div class=\"content\">{description}</div></article>",
        title = provider.title,
        image = image(provider.featured_image.as_deref(), &alt),
        details = details,
        description = provider.description_html(),
    );
    layout(
        &page_title(&provider.title),
        &meta_description(&provider.excerpt),
        &body,
    )
}

pub fn provider_not_found() -> String {
    layout("Proveïdor no trobat", DEFAULT_DESCRIPTION, &not_found_body())
}

/// A singleton CMS page such as the about page
pub fn cms_page(page: &Page) -> String {
    let body = format!(
        "<article class=\"page\" id=\"{id}\"><h1>{title}</h1><div class=\"content\">{content}</div></article>",
        id = ABOUT_PAGE_SLUG,
        title = page.title,
        content = page.content,
    );
    layout(&page_title(&page.title), DEFAULT_DESCRIPTION, &body)
}

pub fn membership() -> String {
    let reasons = [
        "Per tenir un 15% de descompte en la compra de productes.",
        "Per minimitzar l'impacte ambiental. Productes ecològics i de proximitat.",
        "Per fer una compra justa per tot el procés productiu. Visca la pagesia!",
        "Per decidir sobre el funcionament i criteris de la cooperativa. T'esperem a l'assemblea!",
        "Per ser part del teixit que manté viu el barri del Poble-sec.",
    ];
    let items: String = reasons
        .iter()
        .map(|reason| format!("<li>{}</li>", escape(reason)))
        .collect();

    let body = format!(
        "<section class=\"hero\"><h1>Suma't al consum que canvia el món!</h1>\
<p>La Igualitària, economat cooperatiu del Poble-sec, som una botiga cooperativa on podràs adquirir els productes quotidians \
reduint impacte ambiental i garantint preus justos en tota la cadena de producció.</p></section>\n\
<section><h2>Fes-te sòcia de La Igualitària</h2><ol>{items}</ol>\
<a class=\"cta\" href=\"https://usem.liberaforms.org/socialaigualitaria\" rel=\"noopener noreferrer\">Fes-te sòcia</a>\
<p class=\"note\">Per ser sòcia cal fer una aportació inicial de capital social de 50 € (retornable en el moment de donar-se de baixa) \
i el pagament trimestral d'una quota de 20 €.</p></section>",
        items = items,
    );
    layout("Fes-te Sòcia - La Igualitària", DEFAULT_DESCRIPTION, &body)
}

pub fn community() -> String {
    let body = "<section class=\"hero\"><h1>Forma part de la comunitat</h1>\
<p>La Igualitària és molt més que una botiga: és un espai de trobada del barri.</p></section>\n\
<section><h2>Propers esdeveniments</h2>\
<article><h3>Assemblea mensual</h3><p>Assemblea oberta a totes les persones sòcies per prendre decisions sobre el funcionament de la cooperativa.</p></article>\
<article><h3>Taller de fermentats</h3><p>Aprèn a fer kombutxa, quefir i altres fermentats. Places limitades.</p></article></section>\n\
<section><h2>Participa en La Igualitària</h2><a class=\"cta\" href=\"/fer-se-soci\">Fes-te sòcia</a></section>";
    layout("Comunitat - La Igualitària", DEFAULT_DESCRIPTION, body)
}

fn not_found_body() -> String {
    "<section class=\"not-found\"><h1>404</h1><p>Ho sentim, no hem trobat aquesta pàgina</p>\
<p>La pàgina que estàs cercant podria haver estat eliminada, haver canviat de nom o estar temporalment no disponible.</p>\
<a href=\"/\">Tornar a l'inici</a></section>"
        .to_string()
}

pub fn not_found() -> String {
    layout(&page_title("Pàgina no trobada"), DEFAULT_DESCRIPTION, &not_found_body())
}

/// Generic failure page; backend details stay in the logs
pub fn error_page(error: &SiteError) -> String {
    let body = format!(
        "<section class=\"error\"><h1>{}</h1><p>No hem pogut carregar aquesta pàgina. Torna-ho a provar d'aquí a una estona.</p>\
<a href=\"/\">Tornar a l'inici</a></section>",
        error.status_code().as_u16()
    );
    layout(&page_title("Error"), DEFAULT_DESCRIPTION, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ProviderAttributes;

    fn provider(slug: &str, tipus: Option<&str>) -> Provider {
        Provider {
            id: 1,
            slug: slug.to_string(),
            title: "Formatges <em>Serrats</em>".to_string(),
            excerpt: "<p>Formatges d'ovella del Berguedà</p>".to_string(),
            acf: ProviderAttributes {
                tipus: tipus.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_escape_and_strip() {
        assert_eq!(escape("a & <b> \"c\""), "a &amp; &lt;b&gt; &quot;c&quot;");
        assert_eq!(strip_tags("<p>Hola <strong>món</strong></p>\n"), "Hola món\n");
        assert_eq!(strip_tags("<p>a</p><p>b</p>"), "ab");
    }

    #[test]
    fn test_meta_description_is_truncated_by_chars() {
        let excerpt = format!("<p>{}</p>", "à".repeat(300));
        let description = meta_description(&excerpt);
        assert_eq!(description.chars().count(), META_DESCRIPTION_LEN);
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title("Assemblea <b>de</b> maig"), "Assemblea de maig - La Igualitària");
    }

    #[test]
    fn test_provider_detail_uses_description_and_metadata() {
        let mut p = provider("formatges-serrats", Some("lactis"));
        p.content = "<p>Contingut</p>".to_string();
        p.acf.descripcion = Some("<p>Descripció pròpia</p>".to_string());
        p.acf.email = Some("hola@serrats.cat".to_string());

        let html = provider_detail(&p);
        assert!(html.contains("<title>Formatges Serrats - La Igualitària</title>"));
        assert!(html.contains("content=\"Formatges d&#39;ovella del Berguedà\""));
        assert!(html.contains("<p>Descripció pròpia</p>"));
        assert!(!html.contains("<p>Contingut</p>"));
        assert!(html.contains("mailto:hola@serrats.cat"));
    }

    #[test]
    fn test_directory_states() {
        let loading = directory(&DirectoryState::Loading, "", &CategoryFilter::All);
        assert!(loading.contains("Carregant proveïdors"));
        assert!(!loading.contains("categoria=all"));

        let errored = directory(
            &DirectoryState::Errored("backend returned 500".to_string()),
            "",
            &CategoryFilter::All,
        );
        assert!(errored.contains("Error carregant proveïdors: backend returned 500"));

        let ready = DirectoryState::Ready(vec![provider("serrats", Some("lactis"))]);
        let html = directory(&ready, "", &CategoryFilter::All);
        assert!(html.contains("href=\"/proveidors/serrats\""));
        assert!(html.contains("<a class=\"active\" href=\"/proveidors?categoria=all\">Tots</a>"));
        assert!(html.contains(">lactis</a>"));

        let none = directory(&ready, "pa", &CategoryFilter::All);
        assert!(none.contains("No s'han trobat proveïdors"));
        assert!(none.contains("categoria=lactis&amp;q=pa"));
    }

    #[test]
    fn test_not_found_pages() {
        assert!(not_found().contains("Ho sentim, no hem trobat aquesta pàgina"));
        assert!(post_not_found().contains("<title>Post no trobat</title>"));
        assert!(provider_not_found().contains("<title>Proveïdor no trobat</title>"));
    }

    #[test]
    fn test_error_page_hides_backend_detail() {
        let err = SiteError::Backend {
            url: "http://wp.internal/wp-json/wp/v2/posts".to_string(),
            status: 500,
        };
        let html = error_page(&err);
        assert!(html.contains("<h1>502</h1>"));
        assert!(!html.contains("wp.internal"));
    }
}
