pub mod attendance;
pub mod response;
pub mod student;

pub use attendance::{AttendanceRecord, AttendanceState, NewAttendanceRequest, date_matches_prefix};
pub use response::{MessageResponse, ResponseEnvelope};
pub use student::{NewStudentRequest, Student, StudentSummary};
