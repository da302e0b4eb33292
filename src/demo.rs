use crate::models::{Cashflow, Channels, DashboardData, Insight, Kpis, Sale};

pub fn chat_reply(message: &str, rotation: u64) -> String {
    match rotation % 3 {
        0 => format!(
            "🎯 **Demo Marttin AI**\n\nSua pergunta: '{message}'\n\n💡 **Resposta demonstrativa:**\n\
             Essa é uma funcionalidade incrível! O Marttin AI pode ajudar você com:\n\
             • Consultoria empresarial instantânea\n\
             • Análise de mercado personalizada\n\
             • Geração de conteúdo para redes sociais\n\
             • Estratégias de marketing\n\n\
             🔒 **Crie sua conta gratuita** para ter acesso completo e salvar suas conversas!"
        ),
        1 => format!(
            "📊 **Marttin AI Demo**\n\nAnalisando: '{message}'\n\n🚀 **Sugestão estratégica:**\n\
             Com base na sua pergunta, recomendo focar em:\n\
             • Definição clara de objetivos\n\
             • Análise do público-alvo\n\
             • Planejamento de ações práticas\n\n\
             ⚡ **Quer mais?** Usuários cadastrados têm acesso a análises detalhadas, \
             templates profissionais e histórico completo!"
        ),
        _ => format!(
            "💼 **Consultoria Marttin AI**\n\nSua consulta: '{message}'\n\n✨ **Dica profissional:**\n\
             Isso é fundamental para o sucesso do seu negócio! O Marttin pode te ajudar com \
             estratégias personalizadas.\n\n\
             🎁 **Teste completo grátis:**\n\
             • Faça seu cadastro em 30 segundos\n\
             • Acesse todas as ferramentas\n\
             • Sem compromisso inicial"
        ),
    }
}

pub fn demo_dashboard() -> DashboardData {
    DashboardData {
        kpis: Kpis {
            faturamento_mes: Some(125_430.0),
            novos_clientes: Some(87),
            cac: Some(62.5),
        },
        cashflow: Cashflow {
            labels: (1..=12).map(|day| format!("D{day}")).collect(),
            entradas: vec![12., 9., 14., 11., 16., 13., 18., 14., 17., 15., 19., 18.],
            saidas: vec![9., 8., 11., 10., 12., 12., 13., 12., 14., 13., 15., 14.],
        },
        channels: Channels {
            labels: ["Loja Online", "Marketplace", "Instagram", "WhatsApp"]
                .map(String::from)
                .to_vec(),
            values: vec![46., 28., 17., 9.],
        },
        latest_sales: vec![
            sale(1, "2025-10-25", "Maria Oliveira", "Loja Online", 1290.00, "Pago"),
            sale(2, "2025-10-25", "João Lima", "Marketplace", 349.90, "Pago"),
            sale(3, "2025-10-24", "Aline Souza", "Instagram", 179.00, "Pendente"),
        ],
        insights: vec![
            Insight {
                icon: "lightbulb".into(),
                title: "Campanhas com melhor ROI".into(),
                text: "Direcione mais orçamento para Instagram Ads (CAC -15%).".into(),
            },
            Insight {
                icon: "graph-up".into(),
                title: "Fluxo de caixa".into(),
                text: "Previsão de pico de despesas nos próximos 10 dias; considere antecipar recebíveis."
                    .into(),
            },
        ],
    }
}

fn sale(id: u64, data: &str, cliente: &str, canal: &str, valor: f64, status: &str) -> Sale {
    Sale {
        id: Some(id),
        data: data.into(),
        cliente: cliente.into(),
        canal: canal.into(),
        valor: Some(valor),
        status: status.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_rotate_and_quote_message() {
        let first = chat_reply("preço", 0);
        let second = chat_reply("preço", 1);
        assert_ne!(first, second);
        assert_eq!(chat_reply("preço", 3), first);
        assert!(second.contains("'preço'"));
    }

    #[test]
    fn replies_open_with_their_emoji() {
        assert!(chat_reply("oi", 0).starts_with("🎯 **Demo Marttin AI**"));
        assert!(chat_reply("oi", 1).starts_with("📊 **Marttin AI Demo**"));
        assert!(chat_reply("oi", 2).starts_with("💼 **Consultoria Marttin AI**"));
    }

    #[test]
    fn demo_series_are_aligned() {
        let data = demo_dashboard();
        assert_eq!(data.cashflow.labels.len(), data.cashflow.entradas.len());
        assert_eq!(data.cashflow.labels.len(), data.cashflow.saidas.len());
        assert_eq!(data.channels.labels.len(), data.channels.values.len());
    }
}
