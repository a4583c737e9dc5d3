/*
[INPUT]:  Resumed session and local store
[OUTPUT]: Category and priority counts printed to stdout
[POS]:    CLI summary command
[UPDATE]: When summary entries change
*/

use anyhow::{Result, anyhow, bail};
use console::style;

use tasksmart::summary::TaskSummary;
use tasksmart::task_cache::TaskCache;
use tasksmart_client::AuthManager;

pub async fn run_summary(auth: &AuthManager) -> Result<()> {
    let Some(session) = auth.session().session() else {
        bail!("no saved session; run `tasksmart` to log in or start a guest session");
    };

    let cache = TaskCache::new(auth.client().clone());
    cache
        .refresh()
        .await
        .map_err(|err| anyhow!(err.user_message()))?;
    let summary = cache.summary().await;

    let who = if session.is_guest() {
        "guest session".to_string()
    } else {
        session.user.name.clone()
    };
    println!("{}", style(format!("TaskSmart summary for {who}")).bold().cyan());
    print!("{}", render_summary(&summary));
    Ok(())
}

fn render_summary(summary: &TaskSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", style("Categories").bold()));
    for entry in &summary.categories {
        out.push_str(&format!("  {:<10} {:>4}\n", entry.name, entry.count));
    }
    if summary.hidden > 0 {
        out.push_str(&format!(
            "  {}\n",
            style(format!("({} in other categories)", summary.hidden)).dim()
        ));
    }
    out.push_str(&format!("\n{}\n", style("Priorities").bold()));
    for entry in &summary.priorities {
        out.push_str(&format!("  {:<10} {:>4}\n", entry.name, entry.count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasksmart::summary::summarize;

    #[test]
    fn renders_every_entry() {
        console::set_colors_enabled(false);
        let text = render_summary(&summarize(&[]));
        for name in ["All", "Personal", "Work", "Important", "Completed", "High", "Medium", "Low"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(!text.contains("other categories"));
    }
}
