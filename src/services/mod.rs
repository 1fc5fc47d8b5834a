pub mod attendance_service;
pub mod student_service;

pub use attendance_service::AttendanceService;
pub use student_service::StudentService;
