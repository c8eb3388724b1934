//! Help Center Content
//!
//! FAQ entries (answers in markdown) and the search filter over them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faq {
    pub id: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
    pub category: &'static str,
}

pub const FAQS: &[Faq] = &[
    Faq {
        id: "getting-started",
        question: "How do I register a new case?",
        answer: "Sign in and choose **Register New Case** from your dashboard. Fill in the case type, a description and the opposite party's details. Supporting documents can be attached as proof (up to 10MB).",
        category: "Getting Started",
    },
    Faq {
        id: "case-types",
        question: "What types of cases can be mediated?",
        answer: "ResolveIt handles three kinds of cases:\n\n- **Family** disputes (divorce, custody, inheritance)\n- **Business** disputes (contracts, partnerships, employment)\n- **Criminal** cases (minor offenses, settlements)\n\nEach type has specialized mediators.",
        category: "Case Types",
    },
    Faq {
        id: "mediation-process",
        question: "How does the mediation process work?",
        answer: "A registered case is reviewed and assigned to a qualified mediator. You then take part in structured sessions, online or in person, to reach a mutually acceptable resolution. The process typically takes 2-6 weeks.",
        category: "Process",
    },
    Faq {
        id: "costs",
        question: "What are the costs involved?",
        answer: "Basic consultation is free. Mediation fees depend on case complexity and duration, and payment plans are available for qualifying cases.",
        category: "Pricing",
    },
    Faq {
        id: "confidentiality",
        question: "Is the mediation process confidential?",
        answer: "Yes. Sessions and communications are strictly confidential, and information shared during mediation cannot be used in court if mediation fails.",
        category: "Privacy",
    },
    Faq {
        id: "agreement",
        question: "Are mediation agreements legally binding?",
        answer: "Once both parties sign the mediation agreement it becomes legally binding and enforceable in court.",
        category: "Legal",
    },
    Faq {
        id: "timeline",
        question: "How long does mediation typically take?",
        answer: "Most cases resolve within 2-6 weeks. Simple disputes may settle in 1-2 sessions; complex cases can need several sessions over a few weeks.",
        category: "Timeline",
    },
    Faq {
        id: "virtual-sessions",
        question: "Can mediation sessions be conducted online?",
        answer: "Yes. Virtual sessions include video conferencing, document sharing and digital signatures. In-person sessions are available on request.",
        category: "Technology",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactOption {
    pub title: &'static str,
    pub description: &'static str,
    pub contact: &'static str,
    pub hours: &'static str,
}

pub const CONTACT_OPTIONS: &[ContactOption] = &[
    ContactOption {
        title: "Phone Support",
        description: "Speak with our support team",
        contact: "+1 (555) 123-4567",
        hours: "Mon-Fri, 9 AM - 6 PM EST",
    },
    ContactOption {
        title: "Email Support",
        description: "Send us your questions",
        contact: "support@resolveit.com",
        hours: "Response within 24 hours",
    },
    ContactOption {
        title: "Live Chat",
        description: "Chat with our team",
        contact: "Available on website",
        hours: "Mon-Fri, 9 AM - 6 PM EST",
    },
];

/// Case-insensitive match on question, answer or category
pub fn filter_faqs<'a>(faqs: &'a [Faq], query: &str) -> Vec<&'a Faq> {
    let needle = query.trim().to_lowercase();
    faqs.iter()
        .filter(|faq| {
            needle.is_empty()
                || faq.question.to_lowercase().contains(&needle)
                || faq.answer.to_lowercase().contains(&needle)
                || faq.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Distinct categories in first-seen order
pub fn categories(faqs: &[Faq]) -> Vec<&'static str> {
    let mut seen = Vec::new();
    for faq in faqs {
        if !seen.contains(&faq.category) {
            seen.push(faq.category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_keeps_all() {
        assert_eq!(filter_faqs(FAQS, "  ").len(), FAQS.len());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let hits = filter_faqs(FAQS, "BINDING");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "agreement");

        let by_category = filter_faqs(FAQS, "pricing");
        assert_eq!(by_category[0].id, "costs");
        assert!(filter_faqs(FAQS, "xyzzy").is_empty());
    }

    #[test]
    fn test_categories_distinct() {
        let cats = categories(FAQS);
        assert_eq!(cats.len(), FAQS.len());
        assert_eq!(cats[0], "Getting Started");
    }
}
