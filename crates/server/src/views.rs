//! HTML pages.
//!
//! Plain string rendering: every interpolated name is escaped and every path
//! segment in a link is percent-encoded.

use std::fmt::Write;

use fileshare_index::{EntryKind, Navigation};

const STYLE: &str = r#"
body { font-family: sans-serif; font-size: .875rem; margin: 0; }
header { background: #343a40; color: #fff; display: flex; justify-content: space-between; align-items: center; padding: .5rem 1rem; position: fixed; top: 0; left: 0; right: 0; height: 2.5rem; z-index: 2; }
header a { color: #fff; text-decoration: none; font-weight: bold; }
header form { position: relative; }
.sidebar { position: fixed; top: 3.5rem; bottom: 0; left: 0; width: 220px; overflow-y: auto; background: #f8f9fa; }
.sidebar ul { list-style: none; padding-left: 1rem; }
.sidebar a.active { font-weight: bold; color: darkblue; }
main { margin: 3.5rem 0 0 240px; padding: 1rem; }
.listing li { padding: .25rem 0; }
.search-results { position: absolute; right: 0; background: #fff; border: 1px solid #ddd; max-height: 200px; overflow-y: auto; list-style: none; margin: 0; padding: 0; min-width: 100%; color: #000; }
.search-results li { padding: 5px 10px; cursor: pointer; }
.search-results li:hover { background: #f1f1f1; }
"#;

const SCRIPT: &str = r#"
document.addEventListener('DOMContentLoaded', function () {
  var sidebar = document.querySelector('.sidebar');
  var pos = sessionStorage.getItem('scrollPos');
  if (pos) { sidebar.scrollTop = pos; }
  document.querySelectorAll('.sidebar a').forEach(function (link) {
    link.addEventListener('click', function () { sessionStorage.setItem('scrollPos', sidebar.scrollTop); });
  });
  var input = document.querySelector('input[name="q"]');
  var results = document.createElement('ul');
  results.className = 'search-results';
  input.parentNode.appendChild(results);
  input.addEventListener('input', function () {
    var q = input.value;
    if (!q) { results.innerHTML = ''; return; }
    fetch('/live_search?q=' + encodeURIComponent(q))
      .then(function (r) { return r.json(); })
      .then(function (items) {
        results.innerHTML = '';
        items.forEach(function (item) {
          var li = document.createElement('li');
          li.textContent = item;
          li.addEventListener('click', function () {
            window.location.href = '/folder/' + item.split('/').map(encodeURIComponent).join('/');
          });
          results.appendChild(li);
        });
      });
  });
  document.addEventListener('click', function (event) {
    if (!input.contains(event.target) && !results.contains(event.target)) { results.innerHTML = ''; }
  });
});
"#;

pub fn home_page(root_folders: &[String]) -> String {
    let navigation = Navigation {
        root_folders: root_folders.to_vec(),
        ..Navigation::default()
    };
    let main = "<h2>Welcome to the File Share</h2>\
                <p>Select a folder from the sidebar to view its contents.</p>";
    layout("File Share", &navigation, main)
}

pub fn folder_page(folder: &str, navigation: &Navigation, contents: &[String]) -> String {
    let mut main = format!("<h2>Contents of {}</h2>", escape(folder));
    main.push_str("<ul class=\"listing\">");
    for item in contents {
        entry_item(&mut main, &join_path(folder, item), item);
    }
    main.push_str("</ul>");
    layout(folder, navigation, &main)
}

pub fn search_page(root_folders: &[String], query: &str, results: &[&str]) -> String {
    let navigation = Navigation {
        root_folders: root_folders.to_vec(),
        ..Navigation::default()
    };
    let mut main = format!(
        "<h2>Search Results</h2><p>{} match(es) for <strong>{}</strong></p>",
        results.len(),
        escape(query)
    );
    main.push_str("<ul class=\"listing\">");
    for item in results {
        entry_item(&mut main, item, item);
    }
    main.push_str("</ul>");
    layout("Search Results", &navigation, &main)
}

fn layout(title: &str, navigation: &Navigation, main: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title><style>{STYLE}</style><script>{SCRIPT}</script></head><body>\
         <header><a href=\"/\">File Share</a>\
         <form action=\"/search\" method=\"get\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search\" aria-label=\"Search\" autocomplete=\"off\">\
         <button type=\"submit\">Search</button></form></header>\
         <nav class=\"sidebar\">{sidebar}</nav><main>{main}</main></body></html>",
        title = escape(title),
        sidebar = sidebar(navigation),
    )
}

/// Top-level folders, with the opened one expanded to its subfolders.
fn sidebar(navigation: &Navigation) -> String {
    let opened = &navigation.opened_folders;
    let mut html = String::from("<ul>");

    for folder in &navigation.root_folders {
        let class = if opened.contains(folder) { " class=\"active\"" } else { "" };
        let _ = write!(
            html,
            "<li><a{class} href=\"{}\">&#128193; {}</a>",
            href("/folder/", folder),
            escape(folder)
        );

        if let Some(subfolders) = opened.get(folder) {
            html.push_str("<ul>");
            for subfolder in subfolders {
                let class = if navigation.current_folder == *subfolder {
                    " class=\"active\""
                } else {
                    ""
                };
                let _ = write!(
                    html,
                    "<li><a{class} href=\"{}\">&#128193; {}</a></li>",
                    href("/folder/", &join_path(folder, subfolder)),
                    escape(subfolder)
                );
            }
            html.push_str("</ul>");
        }
        html.push_str("</li>");
    }

    html.push_str("</ul>");
    html
}

fn entry_item(html: &mut String, path: &str, label: &str) {
    let (icon, target) = match EntryKind::of(path) {
        EntryKind::File => ("&#128196;", href("/download/", path)),
        EntryKind::Folder => ("&#128193;", href("/folder/", path)),
    };
    let _ = write!(
        html,
        "<li>{icon} <a href=\"{target}\">{}</a></li>",
        escape(label)
    );
}

fn join_path(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{folder}/{name}")
    }
}

fn href(prefix: &str, path: &str) -> String {
    let encoded: Vec<_> = path.split('/').map(urlencoding::encode).collect();
    format!("{prefix}{}", encoded.join("/"))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
