//! Plain-text rendering of views for the terminal

use std::collections::BTreeMap;
use std::fmt::Write;

use congregate_core::Page;
use congregate_domain::{
    constants::UNSPECIFIED_LABEL, AgeBracket, Capabilities, Member, MemberStatistics, Role,
    UserAccount,
};

const NAME_WIDTH: usize = 32;

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn or_unspecified(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNSPECIFIED_LABEL,
    }
}

/// Member list page with a footer.
pub fn member_page(page: &Page<Member>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<NAME_WIDTH$} {:<10} {:<14} {:<14} {:<10}",
        "ID", "Nome", "Região", "Paróquia", "Função", "Gênero"
    );
    for member in &page.items {
        let _ = writeln!(
            out,
            "{:<8} {:<NAME_WIDTH$} {:<10} {:<14} {:<14} {:<10}",
            clip(&member.id, 8),
            clip(&member.full_name, NAME_WIDTH),
            member.region.label(),
            clip(or_unspecified(Some(member.parish.as_str())), 14),
            member.function.label(),
            member.gender.label(),
        );
    }
    if page.items.is_empty() {
        out.push_str("Nenhum membro encontrado\n");
    }
    let _ = writeln!(
        out,
        "Página {} de {} ({} membros)",
        page.page, page.total_pages, page.total_items
    );
    out
}

/// Full record for the detail view.
pub fn member_detail(member: &Member) -> String {
    let mut out = String::new();
    let rows: [(&str, String); 13] = [
        ("ID", member.id.clone()),
        ("Nome Completo", member.full_name.clone()),
        ("Data de Nascimento", member.birth_date.format("%d/%m/%Y").to_string()),
        ("Gênero", member.gender.label().to_string()),
        ("Região", member.region.label().to_string()),
        ("Paróquia", or_unspecified(Some(member.parish.as_str())).to_string()),
        ("Função", member.function.label().to_string()),
        ("Estado", or_unspecified(member.baptismal_state.map(|s| s.label())).to_string()),
        ("Sociedade", or_unspecified(member.society.map(|s| s.label())).to_string()),
        ("Telefone", or_unspecified(member.phone.as_deref()).to_string()),
        ("Email", or_unspecified(member.email.as_deref()).to_string()),
        ("Endereço", or_unspecified(member.address.as_deref()).to_string()),
        ("Cadastrado em", member.created_at.format("%d/%m/%Y %H:%M").to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<20} {value}");
    }
    if let Some(updated) = member.updated_at.filter(|_| member.was_edited()) {
        let _ = writeln!(out, "{:<20} {}", "Atualizado em", updated.format("%d/%m/%Y %H:%M"));
    }
    out
}

fn counts_section(out: &mut String, title: &str, counts: &BTreeMap<String, usize>) {
    let _ = writeln!(out, "{title}:");
    if counts.is_empty() {
        out.push_str("  -\n");
    }
    for (label, count) in counts {
        let _ = writeln!(out, "  {label:<24} {count}");
    }
}

/// Dashboard statistics.
pub fn statistics(stats: &MemberStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total de Membros: {}", stats.total);
    let _ = writeln!(
        out,
        "Masculino: {} ({:.1}%)  Feminino: {} ({:.1}%)",
        stats.by_gender.male.count,
        stats.by_gender.male.percent,
        stats.by_gender.female.count,
        stats.by_gender.female.percent,
    );
    let _ = writeln!(
        out,
        "Novos (30 dias): {}  Anteriores: {}  Crescimento: {:+.1}%",
        stats.growth.current, stats.growth.previous, stats.growth.percent
    );

    counts_section(&mut out, "Por Região", &stats.by_region);
    counts_section(&mut out, "Por Paróquia", &stats.by_parish);
    counts_section(&mut out, "Por Função", &stats.by_function);
    counts_section(&mut out, "Por Sociedade", &stats.by_society);
    counts_section(&mut out, "Por Estado", &stats.by_baptismal_state);

    out.push_str("Faixa Etária:\n");
    for bracket in AgeBracket::ALL {
        let _ = writeln!(out, "  {:<24} {}", bracket.label(), stats.age_count(*bracket));
    }
    out
}

/// Account list, newest first as returned.
pub fn users(accounts: &[UserAccount]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<36} {:<32} {:<12} {}", "ID", "Email", "Função", "Criado em");
    for account in accounts {
        let _ = writeln!(
            out,
            "{:<36} {:<32} {:<12} {}",
            account.id,
            clip(&account.email, 32),
            account.role,
            account.created_at.format("%d/%m/%Y"),
        );
    }
    if accounts.is_empty() {
        out.push_str("Nenhum usuário encontrado\n");
    }
    out
}

/// Signed-in identity and what it may do.
pub fn identity(email: Option<&str>, role: Option<&Role>, caps: Capabilities) -> String {
    let yes_no = |flag: bool| if flag { "sim" } else { "não" };
    let mut out = String::new();
    let _ = writeln!(out, "Email: {}", email.unwrap_or("-"));
    let _ = writeln!(out, "Função: {}", role.map_or("-", Role::as_str));
    let _ = writeln!(out, "Gerir membros: {}", yes_no(caps.can_manage_members));
    let _ = writeln!(out, "Gerir usuários: {}", yes_no(caps.can_manage_users));
    out
}
