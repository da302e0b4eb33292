use crate::models::ContentIdeasForm;

const SOCIAL_MEDIA: [&str; 10] = [
    "🚀 {quantidade} maneiras de {negocio} pode transformar a vida do seu {publico}",
    "💡 Dica rápida: Como {negocio} resolve {problema} em minutos",
    "📊 Estatística surpreendente sobre {setor} que vai impressionar você",
    "🎯 Por que {publico} deve escolher {negocio} em 2025",
    "🔥 Tendência: O futuro de {setor} já chegou",
    "⚡ Transformação: Antes e depois com {negocio}",
    "🌟 Cliente satisfeito: Depoimento real sobre {negocio}",
    "📱 Tutorial: Como aproveitar ao máximo {servico}",
    "💰 Investimento inteligente: Por que {negocio} vale a pena",
    "🎉 Celebrando: Marco importante para {negocio}",
];

const BLOG_POSTS: [&str; 10] = [
    "📝 Guia Completo: Tudo sobre {setor} que {publico} precisa saber",
    "🔍 Análise Profunda: Como {negocio} está revolucionando o mercado",
    "📈 Estudo de Caso: {quantidade} empresas que cresceram com {estrategia}",
    "🎯 Estratégia Detalhada: Como {publico} pode alcançar {objetivo}",
    "💡 Inovação: As tecnologias que estão mudando {setor}",
    "📊 Pesquisa Exclusiva: O que {publico} realmente quer",
    "🏆 Melhores Práticas: Lições aprendidas em {setor}",
    "🔮 Futuro: Previsões para {setor} nos próximos 5 anos",
    "⚠️ Evite Estes Erros: Armadilhas comuns em {setor}",
    "🚀 Transformação Digital: Como {negocio} pode ajudar",
];

const EMAIL_CAMPAIGNS: [&str; 10] = [
    "✉️ Bem-vindo(a)! Sua jornada com {negocio} começa aqui",
    "🎁 Oferta Especial: Desconto exclusivo para {publico}",
    "📢 Novidade: {negocio} tem algo incrível para você",
    "⏰ Última Chance: Oferta termina em breve",
    "💡 Dica Semanal: Como melhorar {area} com {negocio}",
    "🏆 Conquista Desbloqueada: Seu progresso com {negocio}",
    "📊 Relatório Mensal: Seus resultados com {negocio}",
    "🎯 Personalizado: Sugestões baseadas no seu perfil",
    "🔔 Lembrete: Não perca esta oportunidade",
    "💝 Agradecimento: Por escolher {negocio}",
];

const AD_COPY: [&str; 10] = [
    "🎯 {negocio}: A solução que {publico} estava procurando!",
    "💰 Pare de gastar dinheiro à toa. Descubra {negocio}",
    "⚡ Resultados em {tempo}! {negocio} funciona de verdade",
    "🏆 Nº1 em {setor}: {negocio} é referência no mercado",
    "🔥 Oferta Limitada: {desconto} OFF em {negocio}",
    "✅ Garantido: Satisfação ou seu dinheiro de volta",
    "🚀 Transforme sua {area} com {negocio} hoje mesmo",
    "💎 Exclusivo: Acesso VIP para {publico}",
    "⏰ Promoção Relâmpago: {negocio} com preço especial",
    "🎁 Bônus Grátis: Ganhe {bonus} ao escolher {negocio}",
];

const VIDEO_SCRIPTS: [&str; 10] = [
    "🎬 Abertura: Por que {publico} precisa conhecer {negocio}",
    "📹 Tutorial: Passo a passo para usar {servico}",
    "🎥 Depoimento: Cliente real conta sua experiência",
    "🎞️ Bastidores: Como {negocio} funciona por dentro",
    "📺 Comparação: {negocio} vs. concorrência",
    "🎪 Demonstração: Veja {negocio} em ação",
    "🎨 Storytelling: A história por trás de {negocio}",
    "🎯 FAQ: Respostas para as dúvidas mais comuns",
    "🎪 Evento: Lançamento especial de {produto}",
    "🎬 Série: Episódio sobre {topico} em {setor}",
];

const PRODUCT_DESCRIPTIONS: [&str; 10] = [
    "🏷️ {produto}: A escolha inteligente para {publico}",
    "💎 Premium: {produto} com qualidade superior",
    "🔧 Funcional: {produto} que resolve {problema}",
    "🎯 Específico: {produto} feito sob medida para {necessidade}",
    "⚡ Rápido: {produto} com resultados imediatos",
    "🛡️ Confiável: {produto} com garantia de qualidade",
    "💰 Econômico: {produto} com melhor custo-benefício",
    "🌿 Sustentável: {produto} eco-friendly para o futuro",
    "🏆 Premiado: {produto} reconhecido pelo mercado",
    "🔄 Versátil: {produto} para múltiplas aplicações",
];

const SECTORS: [(&str, &[&str]); 6] = [
    ("tecnologia", &["tech", "software", "app", "digital", "sistema"]),
    ("saúde", &["saúde", "médico", "clínica", "hospital", "wellness"]),
    ("educação", &["educação", "curso", "escola", "ensino", "formação"]),
    ("varejo", &["loja", "venda", "produto", "varejo", "comércio"]),
    ("serviços", &["consultoria", "assessoria", "atendimento", "serviço"]),
    ("alimentação", &["restaurante", "comida", "alimentação", "culinária"]),
];

fn templates(content_type: &str) -> &'static [&'static str] {
    match content_type {
        "blog_posts" => &BLOG_POSTS,
        "email_campaigns" => &EMAIL_CAMPAIGNS,
        "ad_copy" => &AD_COPY,
        "video_scripts" => &VIDEO_SCRIPTS,
        "product_descriptions" => &PRODUCT_DESCRIPTIONS,
        _ => &SOCIAL_MEDIA,
    }
}

pub fn sector_of(description: &str) -> &'static str {
    let lower = description.to_lowercase();
    SECTORS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(sector, _)| *sector)
        .unwrap_or("negócios")
}

pub fn adjust_tone(idea: String, tone: &str) -> String {
    match tone {
        "professional" => idea.replace('🔥', "📊").replace('💰', "💼"),
        "casual" => idea.replace('📊', "😊").replace('💼', "👍"),
        "humorous" if !['😂', '🤣', '😄'].iter().any(|emoji| idea.contains(*emoji)) => {
            format!("{idea} 😄")
        }
        "inspirational" => idea.replace('📊', "🌟").replace('💼', "✨"),
        _ => idea,
    }
}

/// Generates up to `quantity` ideas. `rotation` shifts the template window
/// and the rotating variables so consecutive calls differ.
pub fn generate(form: &ContentIdeasForm, quantity: usize, rotation: u64) -> Vec<String> {
    let pool = templates(form.content_type.trim());
    let count = quantity.min(pool.len());
    let offset = (rotation as usize) % pool.len();

    let pick = |options: &[&'static str]| options[(rotation as usize) % options.len()];
    let keywords: Vec<&str> = form
        .keywords
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .collect();

    let business = form
        .business_description
        .split('.')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    let audience = form.target_audience.trim().to_lowercase();
    let topic = keywords.first().copied().unwrap_or("inovação");
    let variables: [(&str, &str); 15] = [
        ("negocio", business.as_str()),
        ("publico", audience.as_str()),
        ("setor", sector_of(&form.business_description)),
        ("problema", "seus desafios"),
        ("servico", "nossos serviços"),
        ("quantidade", pick(&["5", "7", "10"])),
        ("estrategia", "nossa metodologia"),
        ("objetivo", "sucesso"),
        ("area", "seus resultados"),
        ("tempo", pick(&["24h", "7 dias", "30 dias"])),
        ("desconto", pick(&["20%", "30%", "50%"])),
        ("bonus", "material exclusivo"),
        ("produto", "nossa solução"),
        ("topico", topic),
        ("necessidade", "suas demandas"),
    ];

    (0..count)
        .map(|i| {
            let mut idea = pool[(offset + i) % pool.len()].to_string();
            for (name, value) in &variables {
                idea = idea.replace(&format!("{{{name}}}"), value);
            }
            let mut idea = adjust_tone(idea, form.tone.trim());
            if !keywords.is_empty() && i % 2 == 0 {
                let keyword = keywords[(i / 2) % keywords.len()];
                idea.push_str(&format!(" #{}", keyword.replace(' ', "")));
            }
            idea
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContentIdeasForm {
        ContentIdeasForm {
            business_description: "Loja de café especial. Grãos torrados na hora".into(),
            content_type: "social_media".into(),
            platform: "instagram".into(),
            target_audience: "Amantes de Café".into(),
            tone: "professional".into(),
            keywords: "café, grãos especiais".into(),
            quantity: String::new(),
        }
    }

    #[test]
    fn returns_requested_quantity_capped_by_pool() {
        assert_eq!(generate(&form(), 3, 0).len(), 3);
        assert_eq!(generate(&form(), 50, 0).len(), 10);
        assert_eq!(generate(&form(), 0, 0).len(), 0);
    }

    #[test]
    fn variables_are_substituted() {
        let ideas = generate(&form(), 10, 0);
        assert!(ideas.iter().all(|idea| !idea.contains('{')));
        assert!(ideas[0].contains("Loja de café especial"));
        assert!(ideas[0].contains("amantes de café"));
        assert!(ideas.iter().any(|idea| idea.contains("varejo")));
    }

    #[test]
    fn keywords_become_hashtags_on_alternating_ideas() {
        let ideas = generate(&form(), 4, 0);
        assert!(ideas[0].ends_with("#café"));
        assert!(!ideas[1].contains('#'));
        assert!(ideas[2].ends_with("#grãosespeciais"));
    }

    #[test]
    fn rotation_changes_selection() {
        assert_ne!(generate(&form(), 1, 0), generate(&form(), 1, 1));
    }

    #[test]
    fn casual_tone_swaps_template_emoji() {
        let mut casual = form();
        casual.tone = "casual".into();

        let ideas = generate(&casual, 3, 0);

        assert!(ideas[0].starts_with("🚀 5 maneiras de Loja de café especial"));
        assert!(ideas[1].starts_with("💡 Dica rápida"));
        assert!(ideas[2].starts_with("😊 Estatística surpreendente sobre varejo"));
    }

    #[test]
    fn tone_adjustments() {
        assert_eq!(adjust_tone("🔥 oferta 💰".into(), "professional"), "📊 oferta 💼");
        assert_eq!(adjust_tone("dica".into(), "humorous"), "dica 😄");
        assert_eq!(adjust_tone("dica 😂".into(), "humorous"), "dica 😂");
        assert_eq!(adjust_tone("📊".into(), "inspirational"), "🌟");
    }

    #[test]
    fn unknown_sector_defaults() {
        assert_eq!(sector_of("Escritório de advocacia"), "negócios");
        assert_eq!(sector_of("Clínica veterinária"), "saúde");
    }
}
