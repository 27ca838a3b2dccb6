use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use crate::models::{CandidatePage, ExchangeRates, RemovedCurrency};
use crate::services::conversion_service::format_amount;
use crate::services::selection_service::SelectionCoordinator;
use crate::utils::{paginate, Table};

pub const ITEMS_PER_PAGE: usize = 15;

/// Search the user's candidates and cut out one page
pub fn build_candidate_page(
    coordinator: &SelectionCoordinator,
    query: Option<&str>,
    page_num: usize,
) -> Result<CandidatePage, String> {
    let matches = coordinator.search_candidates(query.unwrap_or(""));
    let page = paginate(&matches, page_num, ITEMS_PER_PAGE)?;

    Ok(CandidatePage {
        query: query.map(str::to_string),
        entries: page.items.to_vec(),
        first_index: page.first_index(ITEMS_PER_PAGE),
        page: page.page,
        total_pages: page.total_pages,
        total_matches: matches.len(),
    })
}

/// Split `$candidates` arguments into an optional query and a page number.
/// A trailing number is the page; everything else is the query.
pub fn parse_candidate_args(args: &[&str]) -> (Option<String>, usize) {
    let (page_num, query_args) = match args.split_last() {
        Some((last, rest)) => match last.parse::<usize>() {
            Ok(num) => (num, rest),
            Err(_) => (1, args),
        },
        None => (1, args),
    };

    let query = query_args.join(" ");
    let query = if query.trim().is_empty() { None } else { Some(query) };
    (query, page_num)
}

pub fn create_candidates_embed(page: &CandidatePage) -> CreateEmbed {
    let title = match &page.query {
        Some(query) => format!("🔎 Currencies matching \"{}\"", query),
        None => "🔎 Available Currencies".to_string(),
    };

    let description = if page.entries.is_empty() {
        match &page.query {
            Some(_) => "No inactive currency matches your search.".to_string(),
            None => "Every known currency is already in your active list.".to_string(),
        }
    } else {
        let first = page.first_index;
        page.entries
            .iter()
            .enumerate()
            .map(|(idx, currency)| format!("{}. **{}** (`{}`)", first + idx, currency.name, currency.code))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let footer_text = format!(
        "Page {}/{} • {} match(es) • Add one with $add <CODE>",
        page.page, page.total_pages, page.total_matches
    );

    CreateEmbed::default()
        .title(title)
        .description(description)
        .footer(CreateEmbedFooter::new(footer_text))
        .color(0x00b0f4)
}

/// Render the active list as a table; with rates, each row shows the value
/// of one unit of the focused currency
pub fn render_active_table(coordinator: &SelectionCoordinator, rates: Option<&ExchangeRates>) -> String {
    let focused = coordinator.focused();
    let mut table = Table::new(vec!["#", "Code", "Name", "Per 1 unit"]).align_right(3);

    for (idx, currency) in coordinator.active().iter().enumerate() {
        let is_focused = focused.map(|f| f.code == currency.code).unwrap_or(false);
        let marker = if is_focused { format!("{}*", idx + 1) } else { (idx + 1).to_string() };

        let hint = match (rates, focused) {
            (Some(rates), Some(focused)) => rates
                .cross_rate(&focused.code, &currency.code)
                .map(format_amount)
                .unwrap_or_else(|| "n/a".to_string()),
            _ => "-".to_string(),
        };

        table.add_row(vec![marker, currency.code.to_string(), currency.name.clone(), hint]);
    }

    table.render()
}

pub fn create_active_embed(coordinator: &SelectionCoordinator, rates: Option<&ExchangeRates>) -> CreateEmbed {
    if coordinator.active().is_empty() {
        return CreateEmbed::default()
            .title("💱 Active Currencies")
            .description("Your active list is empty. Browse currencies with `$candidates` and add one with `$add <CODE>`.")
            .color(0xffa500);
    }

    let focused = coordinator
        .focused()
        .map(|c| c.code.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut embed = CreateEmbed::default()
        .title("💱 Active Currencies")
        .description(render_active_table(coordinator, rates))
        .field("Focused", format!("**{}** (marked with *)", focused), true)
        .field("Active", coordinator.active().len().to_string(), true)
        .color(0x00b0f4);

    if let Some(rates) = rates {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Rates as of {}",
            rates.timestamp.format("%Y-%m-%d %H:%M UTC")
        )));
    }

    embed
}

pub fn create_added_embed(coordinator: &SelectionCoordinator, code: &str) -> CreateEmbed {
    CreateEmbed::default()
        .title("✅ Currency Added")
        .description(format!("**{}** is now in your active list.", code))
        .field("Active", list_codes(coordinator), false)
        .color(0x00ff00)
}

pub fn create_removed_embed(coordinator: &SelectionCoordinator, removed: &RemovedCurrency) -> CreateEmbed {
    CreateEmbed::default()
        .title("🗑️ Currency Removed")
        .description(format!(
            "**{}** was removed from position {}. Type `$undo` to restore it.",
            removed.currency.code,
            removed.position + 1
        ))
        .field("Active", list_codes(coordinator), false)
        .color(0xffa500)
}

pub fn create_restored_embed(coordinator: &SelectionCoordinator, restored: &RemovedCurrency) -> CreateEmbed {
    CreateEmbed::default()
        .title("↩️ Currency Restored")
        .description(format!(
            "**{}** is back at position {}.",
            restored.currency.code,
            restored.position + 1
        ))
        .field("Active", list_codes(coordinator), false)
        .color(0x00ff00)
}

/// "USD → EUR → JPY", or a placeholder for an empty list
pub fn list_codes(coordinator: &SelectionCoordinator) -> String {
    if coordinator.active().is_empty() {
        return "(empty)".to_string();
    }
    coordinator
        .active()
        .iter()
        .map(|c| c.code.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use chrono::Utc;
    use crate::models::{Catalog, Currency, CurrencyCode};

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn coordinator(catalog_size: usize) -> SelectionCoordinator {
        let mut currencies = vec![
            Currency::new(code("USD"), "United States Dollar"),
            Currency::new(code("EUR"), "Euro"),
        ];
        for i in 0..catalog_size {
            currencies.push(Currency::new(code(&format!("X{:02}", i)), format!("Test Currency {:02}", i)));
        }
        let mut coordinator = SelectionCoordinator::new(Arc::new(Catalog::new(currencies)));
        coordinator.activate(&code("USD")).unwrap();
        coordinator.activate(&code("EUR")).unwrap();
        coordinator
    }

    #[test]
    fn test_parse_candidate_args() {
        assert_eq!(parse_candidate_args(&[]), (None, 1));
        assert_eq!(parse_candidate_args(&["2"]), (None, 2));
        assert_eq!(parse_candidate_args(&["pound"]), (Some("pound".to_string()), 1));
        assert_eq!(
            parse_candidate_args(&["new", "zealand", "3"]),
            (Some("new zealand".to_string()), 3)
        );
    }

    #[test]
    fn test_build_candidate_page() {
        let coordinator = coordinator(20);

        let first = build_candidate_page(&coordinator, None, 1).unwrap();
        assert_eq!(first.total_matches, 20);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.entries.len(), ITEMS_PER_PAGE);
        assert_eq!(first.entries[0].code, code("X00"));

        let second = build_candidate_page(&coordinator, None, 2).unwrap();
        assert_eq!(second.entries.len(), 5);

        assert!(build_candidate_page(&coordinator, None, 3).is_err());

        let searched = build_candidate_page(&coordinator, Some("currency 1"), 1).unwrap();
        assert_eq!(searched.total_matches, 10);
    }

    #[test]
    fn test_render_active_table_marks_focus_and_hints() {
        let coordinator = coordinator(0);
        let mut rates = HashMap::new();
        rates.insert(code("EUR"), 0.5);
        let rates = ExchangeRates { base: code("USD"), timestamp: Utc::now(), rates };

        let rendered = render_active_table(&coordinator, Some(&rates));
        assert!(rendered.contains("1* | USD"));
        assert!(rendered.contains("0.50"));

        let without_rates = render_active_table(&coordinator, None);
        assert!(without_rates.contains(" -"));
    }

    #[test]
    fn test_list_codes() {
        let mut coordinator = coordinator(0);
        assert_eq!(list_codes(&coordinator), "USD → EUR");
        coordinator.deactivate(&code("USD")).unwrap();
        coordinator.deactivate(&code("EUR")).unwrap();
        assert_eq!(list_codes(&coordinator), "(empty)");
    }
}
