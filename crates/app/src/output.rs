//! Printing results as text lines or JSON.

use serde::Serialize;

use scholar_domain::academics::{Assessment, ChatMessage, ChatRole, Conversation, Curriculum, Subject, Syllabus};
use scholar_domain::{RoadmapGraph, RoadmapLink, RoadmapNode};
use scholar_infrastructure::to_json_pretty;

/// Prints a list, one line per item, or the whole list as JSON.
pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        print!("{}", to_json_pretty(data)?);
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

/// Prints a single value as text or JSON.
pub fn print_one<T: Serialize>(json: bool, data: &T, row: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        print!("{}", to_json_pretty(data)?);
    } else {
        println!("{}", row(data));
    }
    Ok(())
}

pub fn subject_row(subject: &Subject) -> String {
    format!(
        "{}\t{}\t{}\t{} credits",
        subject.id, subject.code, subject.name, subject.credits
    )
}

pub fn subject_detail(subject: &Subject) -> String {
    let mut text = subject_row(subject);
    if let Some(description) = &subject.description {
        text.push('\n');
        text.push_str(description);
    }
    text
}

pub fn syllabus_row(syllabus: &Syllabus) -> String {
    format!(
        "{}\t{}\t{} assessments, {}% weighted",
        syllabus.id,
        syllabus.title,
        syllabus.assessments.len(),
        syllabus.total_weight()
    )
}

pub fn assessment_row(assessment: &Assessment) -> String {
    format!(
        "{}\t{}\t{}\t{}%",
        assessment.id, assessment.name, assessment.kind, assessment.weight
    )
}

pub fn curriculum_row(curriculum: &Curriculum) -> String {
    format!(
        "{}\t{}\t{} {}\t{}",
        curriculum.id, curriculum.name, curriculum.program, curriculum.year, curriculum.status
    )
}

pub fn node_row(node: &RoadmapNode) -> String {
    let mark = if node.completed { "x" } else { " " };
    format!("[{mark}] {}\t{}", node.id, node.label)
}

pub fn link_row(link: &RoadmapLink) -> String {
    format!("{}\t{} -> {}", link.id, link.source, link.target)
}

/// Nodes with their prerequisites listed underneath.
pub fn roadmap_text(graph: &RoadmapGraph) -> String {
    let mut lines = Vec::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
        lines.push(node_row(node));
        let prerequisites: Vec<String> = graph
            .prerequisites_of(node.id)
            .iter()
            .map(|p| p.label.clone())
            .collect();
        if !prerequisites.is_empty() {
            lines.push(format!("      requires {}", prerequisites.join(", ")));
        }
    }
    lines.join("\n")
}

pub fn conversation_row(conversation: &Conversation) -> String {
    format!(
        "{}\t{}\t{}",
        conversation.id,
        conversation.title,
        conversation.created_at.format("%Y-%m-%d %H:%M")
    )
}

pub fn message_text(message: &ChatMessage) -> String {
    let speaker = match message.role {
        ChatRole::User => "you",
        ChatRole::Assistant => "tutor",
        ChatRole::System => "system",
    };
    format!("{speaker}: {}", message.content)
}
