//! HTML pages: the input form and the result page.
//!
//! Every number on these pages goes through [`format_decimal_fr`]; every
//! user-supplied string goes through [`escape_html`].

use chrono::{Datelike, Utc};

use crate::format::{format_date_fr, format_decimal_fr};
use crate::models::CalculationResult;

use super::request::FormSubmission;

/// Escapes the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<main>
<h1>{title}</h1>
{body}
</main>
<footer><p>&copy; {year} Estimation indicative, sans valeur contractuelle.</p></footer>
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
        year = Utc::now().year(),
    )
}

/// Renders the input form, optionally with an error message and the values
/// previously typed.
pub fn render_form_page(
    scheme_name: &str,
    error: Option<&str>,
    values: Option<&FormSubmission>,
) -> String {
    let empty = FormSubmission::default();
    let values = values.unwrap_or(&empty);

    let error_block = error
        .map(|message| format!(r#"<p class="error" role="alert">{}</p>"#, escape_html(message)))
        .unwrap_or_default();
    let checked = if values.entered_during_year() { " checked" } else { "" };

    let body = format!(
        r#"{error_block}
<form method="post" action="/calculate">
  <label for="salaire_mensuel">Salaire mensuel brut (€)</label>
  <input type="text" inputmode="decimal" id="salaire_mensuel" name="salaire_mensuel" value="{salary}" required>

  <label for="absences_ouvrees">Jours ouvrés d'absence</label>
  <input type="number" min="0" step="1" id="absences_ouvrees" name="absences_ouvrees" value="{absences}" required>

  <label>
    <input type="checkbox" name="entered_in_2024" value="yes"{checked}>
    Entrée dans l'entreprise en cours d'année
  </label>

  <label for="date_entree_str">Date d'entrée (JJ/MM/AAAA)</label>
  <input type="text" id="date_entree_str" name="date_entree_str" placeholder="JJ/MM/AAAA" value="{entry}">

  <button type="submit">Calculer</button>
</form>"#,
        error_block = error_block,
        salary = escape_html(&values.salaire_mensuel),
        absences = escape_html(&values.absences_ouvrees),
        checked = checked,
        entry = escape_html(values.date_entree_str.as_deref().unwrap_or("")),
    );

    layout(scheme_name, &body)
}

/// Renders the result page with the inputs recalled above the estimate.
pub fn render_result_page(
    scheme_name: &str,
    values: &FormSubmission,
    result: &CalculationResult,
) -> String {
    let diagnostics = &result.diagnostics;
    let warnings: String = result
        .audit_trace
        .warnings
        .iter()
        .map(|w| format!(r#"<p class="warning">{}</p>"#, escape_html(&w.message)))
        .collect();

    let body = format!(
        r#"<section class="inputs">
  <h2>Vos données</h2>
  <dl>
    <dt>Salaire mensuel brut</dt><dd>{salary} €</dd>
    <dt>Jours ouvrés d'absence</dt><dd>{absences}</dd>
    <dt>Date d'entrée</dt><dd>{entry}</dd>
    <dt>Date de sortie</dt><dd>{exit}</dd>
  </dl>
</section>
<section class="results">
  <h2>Estimation</h2>
  <dl>
    <dt>Estimation brute (€)</dt><dd id="gross">{gross}</dd>
    <dt>Estimation nette (€)</dt><dd id="net">{net}</dd>
  </dl>
  {warnings}
</section>
<section class="details">
  <h2>Détails du calcul</h2>
  <dl>
    <dt>Ratio de présence calendaire</dt><dd>{calendar_ratio}</dd>
    <dt>Ratio de présence (jours ouvrés)</dt><dd>{working_ratio}</dd>
    <dt>Salaire annuel proratisé (€)</dt><dd>{annual_salary}</dd>
    <dt>Part présence (€)</dt><dd>{presence_part}</dd>
    <dt>Part salaire (€)</dt><dd>{salary_part}</dd>
  </dl>
</section>
<p><a href="/">Nouveau calcul</a></p>"#,
        salary = escape_html(values.salaire_mensuel.trim()),
        absences = escape_html(values.absences_ouvrees.trim()),
        entry = format_date_fr(result.entry_date),
        exit = format_date_fr(result.exit_date),
        gross = format_decimal_fr(result.gross_estimate, 2),
        net = format_decimal_fr(result.net_estimate, 2),
        warnings = warnings,
        calendar_ratio = format_decimal_fr(diagnostics.calendar_presence_ratio, 4),
        working_ratio = format_decimal_fr(diagnostics.working_day_presence_ratio, 4),
        annual_salary = format_decimal_fr(diagnostics.prorate_annual_salary, 2),
        presence_part = format_decimal_fr(diagnostics.presence_pool_per_head, 2),
        salary_part = format_decimal_fr(diagnostics.salary_pool_per_head, 2),
    );

    layout(scheme_name, &body)
}
