//! Rendering behavior exercised end to end through the domain API, the
//! way the issuer and the sweeper drive it.

use std::collections::HashMap;

use domain::services::template_render::{render, RenderedEmail, TemplateSource, TenantBlocks};

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn reminder_template<'a>() -> TemplateSource<'a> {
    TemplateSource {
        subject: "Relance : {{campaign_title}}",
        html_body: "<p>Bonjour {{contact_name}},</p>\
            <p>Votre reponse pour {{campaign_title}} est attendue.</p>\
            <p><a href=\"{{invitation_url}}\">Repondre</a></p>",
        text_body: "Bonjour {{contact_name}},\n\
            Votre reponse pour {{campaign_title}} est attendue.\n\
            Repondre : {{invitation_url}}",
    }
}

fn full_blocks<'a>() -> TenantBlocks<'a> {
    TenantBlocks {
        signature_html: Some("<p><b>FC Exemple</b><br>Stade municipal, 31000 Toulouse</p>"),
        legal_markdown: Some(
            "## Mentions RGPD\n\
             Vos coordonnees sont utilisees pour la gestion des partenariats.\n\
             - droit d'acces\n\
             - droit de rectification\n\n\
             Contact : **rgpd@fc-exemple.fr**",
        ),
    }
}

#[test]
fn substitution_covers_subject_html_and_text() {
    let rendered = render(
        &reminder_template(),
        &vars(&[
            ("campaign_title", "Panneau LED"),
            ("contact_name", "Claire"),
            ("invitation_url", "https://app.example.com/invite/tok"),
        ]),
        &TenantBlocks::default(),
    );

    assert_eq!(rendered.subject, "Relance : Panneau LED");
    for body in [&rendered.html, &rendered.text] {
        assert!(body.contains("Claire"));
        assert!(body.contains("Panneau LED"));
        assert!(body.contains("https://app.example.com/invite/tok"));
        assert!(!body.contains("{{"));
    }
}

#[test]
fn missing_variables_stay_verbatim() {
    let rendered = render(
        &reminder_template(),
        &vars(&[("campaign_title", "Panneau LED")]),
        &TenantBlocks::default(),
    );

    assert!(rendered.html.contains("{{contact_name}}"));
    assert!(rendered.text.contains("{{invitation_url}}"));
}

#[test]
fn rendering_is_byte_identical_across_calls() {
    let variables = vars(&[
        ("campaign_title", "Panneau LED"),
        ("contact_name", "Claire"),
        ("invitation_url", "https://app.example.com/invite/tok"),
    ]);

    let first: RenderedEmail = render(&reminder_template(), &variables, &full_blocks());
    let second: RenderedEmail = render(&reminder_template(), &variables, &full_blocks());

    assert_eq!(first, second);
}

#[test]
fn tenant_blocks_append_in_signature_then_legal_order() {
    let rendered = render(&reminder_template(), &vars(&[]), &full_blocks());

    // html: signature block, then styled legal block
    let sig_pos = rendered.html.find("FC Exemple").unwrap();
    let legal_pos = rendered.html.find("Mentions RGPD").unwrap();
    assert!(sig_pos < legal_pos);
    assert!(rendered.html.contains("<h2>Mentions RGPD</h2>"));
    assert!(rendered.html.contains("<li>droit d'acces</li>"));
    assert!(rendered
        .html
        .contains("<strong>rgpd@fc-exemple.fr</strong>"));

    // text: tag-stripped signature, then raw markdown
    let text_sig = rendered.text.find("FC Exemple").unwrap();
    let text_legal = rendered.text.find("## Mentions RGPD").unwrap();
    assert!(text_sig < text_legal);
    assert!(rendered.text.contains("Stade municipal, 31000 Toulouse"));
    assert!(rendered.text.contains("- droit d'acces"));
    assert!(!rendered.text[text_sig..text_legal].contains('<'));
}

#[test]
fn blank_tenant_blocks_change_nothing() {
    let plain = render(&reminder_template(), &vars(&[]), &TenantBlocks::default());
    let blank = render(
        &reminder_template(),
        &vars(&[]),
        &TenantBlocks {
            signature_html: Some("  \n "),
            legal_markdown: Some(""),
        },
    );
    assert_eq!(plain, blank);
}
