use crate::auth::UserProfile;
use crate::catalog;
use crate::models::{PageView, PlatformDetail, PlatformSummary, SearchView};
use crate::theme::ThemeMode;
use chrono::TimeDelta;
use std::fmt::Write;

pub fn render_index(view: &PageView) -> String {
    INDEX_HTML
        .replace("{{THEME_CLASS}}", theme_class(view.theme))
        .replace("{{THEME_ICON}}", view.theme.icon())
        .replace("{{AUTH}}", &render_auth(view.user.as_ref()))
        .replace("{{SEARCH}}", &render_search(view.search.as_ref()))
        .replace("{{GRID}}", &render_grid(&view.grid))
        .replace("{{DETAIL}}", &view.detail.as_ref().map(render_detail).unwrap_or_default())
        .replace("{{TOOLS}}", &render_tools())
        .replace("{{TUTORIALS}}", &render_tutorials())
        .replace("{{TUTORIAL_RUNTIME}}", &format_runtime(catalog::total_tutorial_runtime()))
}

/// Escapes text for element content and double-quoted attributes. Braces
/// are escaped too so user text can never form a template placeholder.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            other => out.push(other),
        }
    }
    out
}

fn theme_class(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "light-mode",
        ThemeMode::Dark => "",
    }
}

fn render_auth(user: Option<&UserProfile>) -> String {
    match user {
        Some(user) => format!(
            r#"<div class="user-menu" id="userMenu">
        <span class="user-initials" id="userInitials">{initials}</span>
        <span class="user-details">
          <span class="user-name" id="userName">{name}</span>
          <span class="user-email" id="userEmail">{email}</span>
        </span>
        <form method="post" action="/auth/sign-out">
          <button class="btn-ghost" id="logoutBtn" type="submit">Log out</button>
        </form>
      </div>"#,
            initials = escape_html(&user.initials()),
            name = escape_html(&user.name),
            email = escape_html(&user.email),
        ),
        None => r#"<form class="sign-in" method="post" action="/auth/sign-in">
        <input name="name" placeholder="Your name" aria-label="Your name" />
        <button class="btn-primary" id="signInBtn" type="submit">Sign in</button>
      </form>"#
            .to_owned(),
    }
}

fn render_search(search: Option<&SearchView>) -> String {
    let query = search.map(|search| search.query.as_str()).unwrap_or_default();
    let mut html = format!(
        r#"<form class="search" method="get" action="/">
        <input id="searchInput" name="q" value="{}" placeholder="Search platforms or categories" aria-label="Search" />
        <button class="btn-primary" id="searchBtn" type="submit">Search</button>
      </form>"#,
        escape_html(query)
    );

    let Some(search) = search else {
        return html;
    };
    html.push_str(r#"<div class="search-results" id="searchResults">"#);
    if search.results.is_empty() {
        html.push_str(r#"<p class="empty">No platforms found</p>"#);
    }
    for platform in &search.results {
        let _ = write!(
            html,
            r##"<a class="search-result-item" href="/?platform={id}#detail"><span class="search-result-icon">{icon}</span><span class="search-result-name">{name}</span></a>"##,
            id = escape_html(platform.id),
            icon = platform.icon,
            name = escape_html(platform.name),
        );
    }
    html.push_str("</div>");
    html
}

fn render_grid(grid: &[PlatformSummary]) -> String {
    if grid.is_empty() {
        return r#"<p class="empty">No platforms found</p>"#.to_owned();
    }
    let mut html = String::new();
    for card in grid {
        let progress = if card.percent_complete > 0 {
            format!(r#"<div class="platform-progress">{}% Complete</div>"#, card.percent_complete)
        } else {
            String::new()
        };
        let _ = write!(
            html,
            r##"<a class="platform-card" href="/?platform={id}#detail">
          <div class="platform-badge">{category}</div>
          <div class="platform-icon">{icon}</div>
          <div class="platform-name">{name}</div>
          {progress}
        </a>"##,
            id = escape_html(card.id),
            category = escape_html(card.category),
            icon = card.icon,
            name = escape_html(card.name),
        );
    }
    html
}

fn render_detail(detail: &PlatformDetail) -> String {
    let mut resources = String::new();
    for resource in &detail.resources {
        let state = if resource.completed { "completed" } else { "" };
        let checked = if resource.completed { "checked" } else { "" };
        let label = if resource.completed {
            "Mark as not done"
        } else {
            "Mark as done"
        };
        let _ = write!(
            resources,
            r#"<div class="resource-item {state}">
            <form method="post" action="/progress/toggle">
              <input type="hidden" name="platform" value="{platform}" />
              <input type="hidden" name="resource" value="{title}" />
              <button class="resource-checkbox {checked}" type="submit" aria-label="{label}"></button>
            </form>
            <div class="resource-item-content">
              <div class="resource-item-title">{title}</div>
              <div class="resource-item-desc">{description}</div>
              <div class="resource-item-meta">{difficulty} • {time}</div>
              <a href="{link}" target="_blank" rel="noopener noreferrer" class="resource-item-link">Learn More →</a>
            </div>
          </div>"#,
            platform = escape_html(detail.id),
            title = escape_html(resource.title),
            description = escape_html(resource.description),
            difficulty = resource.difficulty,
            time = escape_html(resource.estimated_time),
            link = escape_html(resource.link),
        );
    }

    format!(
        r#"<section class="platform-detail" id="detail">
      <a class="detail-close" href="/" aria-label="Close">×</a>
      <div class="platform-detail-icon">{icon}</div>
      <h2 class="platform-detail-title">{name}</h2>
      <p class="platform-detail-description">{description}</p>
      <a href="{main_link}" target="_blank" rel="noopener noreferrer" class="main-platform-link">Open Official Guides →</a>
      <div class="completion-stats">
        <div class="stat-item">
          <div class="stat-value">{completed}/{total}</div>
          <div class="stat-label-small">Completed</div>
        </div>
        <div class="stat-item">
          <div class="stat-value">{percent}%</div>
          <div class="stat-label-small">Progress</div>
        </div>
      </div>
      <div class="resource-section">
        <h3 class="resource-section-title">📖 Learning Resources</h3>
        <div class="resource-list">{resources}</div>
      </div>
    </section>"#,
        icon = detail.icon,
        name = escape_html(detail.name),
        description = escape_html(detail.description),
        main_link = escape_html(detail.main_link),
        completed = detail.completed_resources,
        total = detail.total_resources,
        percent = detail.percent_complete,
    )
}

fn render_tools() -> String {
    let mut html = String::new();
    for tool in catalog::tools() {
        let _ = write!(
            html,
            r#"<a class="tool-card" href="{link}" target="_blank" rel="noopener noreferrer">
          <div class="tool-icon">{icon}</div>
          <div class="tool-name">{name}</div>
          <div class="tool-category">{category}</div>
          <p>{description}</p>
        </a>"#,
            link = escape_html(tool.link),
            icon = tool.icon,
            name = escape_html(tool.name),
            category = escape_html(tool.category),
            description = escape_html(tool.description),
        );
    }
    html
}

fn render_tutorials() -> String {
    let mut html = String::new();
    for tutorial in catalog::tutorials() {
        let _ = write!(
            html,
            r#"<a class="tutorial-card" href="{url}" target="_blank" rel="noopener noreferrer">
          <div class="tutorial-icon">{icon}</div>
          <div class="tutorial-title">{title}</div>
          <div class="tutorial-meta">{platform} · {duration}</div>
          <p>{description}</p>
        </a>"#,
            url = escape_html(&tutorial.watch_url()),
            icon = tutorial.icon,
            title = escape_html(tutorial.title),
            platform = escape_html(tutorial.platform),
            duration = escape_html(tutorial.duration),
            description = escape_html(tutorial.description),
        );
    }
    html
}

fn format_runtime(runtime: TimeDelta) -> String {
    let hours = runtime.num_hours();
    let minutes = runtime.num_minutes() % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>ASE Tech Catalog</title>
  <style>
    :root {
      --bg: #0b1020;
      --card: #141b33;
      --ink: #e7ecf7;
      --text-muted: #94a0bd;
      --primary-cyan: #38d6e8;
      --accent: #7c5cff;
      --border: rgba(148, 160, 189, 0.18);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.35);
    }

    body.light-mode {
      --bg: #f5f7fb;
      --card: #ffffff;
      --ink: #1b2337;
      --text-muted: #5b6680;
      --primary-cyan: #0a8fa3;
      --border: rgba(27, 35, 55, 0.12);
      --shadow: 0 24px 60px rgba(27, 35, 55, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    a {
      color: inherit;
      text-decoration: none;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
      padding: 20px 32px;
      border-bottom: 1px solid var(--border);
    }

    .brand {
      font-size: 1.4rem;
      font-weight: 600;
    }

    .header-actions {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 32px 18px 48px;
      display: grid;
      gap: 36px;
    }

    h2 {
      margin: 0 0 16px;
    }

    input {
      border: 1px solid var(--border);
      background: var(--card);
      color: var(--ink);
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 1rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-primary {
      background: var(--accent);
      color: white;
    }

    .btn-ghost {
      background: transparent;
      color: var(--ink);
      border: 1px solid var(--border);
    }

    .sign-in,
    .search {
      display: flex;
      gap: 8px;
    }

    .search input {
      flex: 1;
    }

    .user-menu {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .user-initials {
      display: grid;
      place-items: center;
      width: 38px;
      height: 38px;
      border-radius: 50%;
      background: var(--accent);
      color: white;
      font-weight: 600;
    }

    .user-details {
      display: grid;
      font-size: 0.85rem;
    }

    .user-email,
    .tool-category,
    .tutorial-meta,
    .resource-item-meta,
    .stat-label-small,
    .empty {
      color: var(--text-muted);
    }

    .hero {
      display: grid;
      gap: 12px;
    }

    .hero h1 {
      margin: 0;
      font-size: clamp(2rem, 4vw, 2.8rem);
    }

    .search-results {
      display: grid;
      gap: 8px;
      margin-top: 12px;
    }

    .search-result-item {
      display: flex;
      gap: 12px;
      padding: 12px 16px;
      border-radius: 14px;
      background: var(--card);
      border: 1px solid var(--border);
    }

    .platform-grid,
    .tool-grid,
    .tutorial-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .platform-card,
    .tool-card,
    .tutorial-card,
    .platform-detail {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 20px;
      padding: 20px;
      box-shadow: var(--shadow);
    }

    .platform-badge {
      display: inline-block;
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--primary-cyan);
    }

    .platform-icon,
    .tool-icon,
    .tutorial-icon,
    .platform-detail-icon {
      font-size: 2.4rem;
      margin: 10px 0;
    }

    .platform-name {
      font-size: 1.2rem;
      font-weight: 600;
    }

    .platform-progress {
      margin-top: 1rem;
      font-size: 0.9rem;
      color: var(--primary-cyan);
    }

    .platform-detail {
      position: relative;
      display: grid;
      gap: 14px;
    }

    .detail-close {
      position: absolute;
      top: 14px;
      right: 20px;
      font-size: 1.6rem;
    }

    .platform-detail-title {
      margin: 0;
    }

    .main-platform-link,
    .resource-item-link {
      color: var(--primary-cyan);
    }

    .completion-stats {
      display: flex;
      gap: 16px;
    }

    .stat-item {
      padding: 12px 18px;
      border-radius: 14px;
      border: 1px solid var(--border);
    }

    .stat-value {
      font-size: 1.5rem;
      font-weight: 600;
    }

    .resource-list {
      display: grid;
      gap: 12px;
    }

    .resource-item {
      display: flex;
      gap: 14px;
      padding: 14px;
      border-radius: 14px;
      border: 1px solid var(--border);
    }

    .resource-item.completed {
      opacity: 0.75;
    }

    .resource-item.completed .resource-item-title {
      text-decoration: line-through;
    }

    .resource-checkbox {
      width: 24px;
      height: 24px;
      padding: 0;
      border-radius: 6px;
      border: 2px solid var(--primary-cyan);
      background: transparent;
    }

    .resource-checkbox.checked {
      background: var(--primary-cyan);
    }

    .resource-item-title {
      font-weight: 600;
    }

    .runtime {
      color: var(--text-muted);
      font-size: 0.95rem;
    }

    @media (max-width: 600px) {
      header {
        padding: 16px;
      }
    }
  </style>
</head>
<body class="{{THEME_CLASS}}">
  <header>
    <div class="brand">ASE_TECH10101</div>
    <div class="header-actions">
      <form method="post" action="/theme/toggle">
        <button class="btn-ghost" id="darkModeToggle" type="submit" aria-label="Toggle theme">{{THEME_ICON}}</button>
      </form>
      {{AUTH}}
    </div>
  </header>

  <main>
    <section class="hero">
      <h1>Learn the stack, one resource at a time.</h1>
      <a class="btn-primary" id="accessBtn" href="#resources">Access resources</a>
      {{SEARCH}}
    </section>

    {{DETAIL}}

    <section id="resources">
      <h2>Platforms</h2>
      <div class="platform-grid" id="platformGrid">{{GRID}}</div>
    </section>

    <section>
      <h2>Tools</h2>
      <div class="tool-grid">{{TOOLS}}</div>
    </section>

    <section>
      <h2>Video tutorials</h2>
      <p class="runtime">Total runtime {{TUTORIAL_RUNTIME}}</p>
      <div class="tutorial-grid">{{TUTORIALS}}</div>
    </section>
  </main>
</body>
</html>
"##;
