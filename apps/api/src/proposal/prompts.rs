// Prompt template for proposal drafting.
// The service speaks a single language; the instructions and the output are Turkish.

use crate::proposal::models::ProposalBrief;

/// Proposal drafting prompt. Replace: {company_name}, {sector}, {problem}, {requested_service}
pub const PROPOSAL_PROMPT_TEMPLATE: &str = "
Sen deneyimli bir danışmansın.
Aşağıdaki bilgilere dayanarak, doğrudan müşteriye gönderilebilecek
kurumsal teklif hazırla.

FORMAT KURALLARI
Sadece düz metin kullan
Markdown, yıldız, tire, numara, emoji kullanma
Başlıklar BÜYÜK HARF
Kurumsal ve resmi dil kullan

En üstte başlık olmasın direk Sayın, ile başlasın.

FİRMA BİLGİLERİ
Firma Adı: {company_name}
Sektör: {sector}
Problem: {problem}
Talep Edilen Hizmet: {requested_service}
";

/// Builds the drafting prompt. Field values are embedded verbatim.
pub fn build_proposal_prompt(brief: &ProposalBrief<'_>) -> String {
    // Single pass so a value that itself contains a placeholder is never re-substituted.
    let mut out = String::with_capacity(PROPOSAL_PROMPT_TEMPLATE.len() + 256);
    let mut rest = PROPOSAL_PROMPT_TEMPLATE;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start..];
        let end = match after.find('}') {
            Some(end) => end,
            None => break,
        };
        let value = match &after[1..end] {
            "company_name" => brief.company_name,
            "sector" => brief.sector,
            "problem" => brief.problem,
            "requested_service" => brief.requested_service,
            _ => &after[..=end],
        };
        out.push_str(value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
