//! Academic portal resources: subjects, syllabi, curricula and chat.

mod chat;
mod curriculum;
mod page;
mod subject;
mod syllabus;

pub use chat::{ChatMessage, ChatRole, Conversation, NewChatMessage, NewConversation};
pub use curriculum::{Curriculum, CurriculumStatus, NewCurriculum};
pub use page::{Page, PageQuery};
pub use subject::{NewSubject, Subject, SubjectUpdate};
pub use syllabus::{Assessment, NewAssessment, NewSyllabus, Syllabus, MAX_TOTAL_WEIGHT};
