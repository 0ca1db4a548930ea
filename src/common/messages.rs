// src/common/messages.rs
// Mensagens públicas da API (o frontend já depende destes textos em inglês).

pub fn created(entity: &str) -> String {
    format!("{} created successfully", entity)
}

pub fn updated(entity: &str) -> String {
    format!("{} updated successfully", entity)
}

pub fn deleted(entity: &str) -> String {
    format!("{} deleted successfully", entity)
}

pub fn retrieved(entity: &str) -> String {
    format!("{} successfully retrieved", entity)
}

// --- NOT FOUND ---
pub const NOT_FOUND_USER: &str = "User not found";
pub const NOT_FOUND_CLIENT: &str = "Client not found";
pub const NOT_FOUND_PROCESSO: &str = "Processo not found";
pub const NOT_FOUND_RESPONSAVEL: &str = "Responsible lawyer not found";
pub const NOT_FOUND_DOCUMENT: &str = "Document not found";
pub const NOT_FOUND_DOCUMENTO_PROCESSO: &str = "Documento do processo not found";
pub const NOT_FOUND_BOLETO: &str = "Boleto not found";
pub const NOT_FOUND_ENDERECO: &str = "Endereco not found";
pub const NOT_FOUND_AGENDAMENTO: &str = "Agendamento not found";
pub const NOT_FOUND_CEP: &str = "CEP not found";

// --- CONFLICT ---
pub const USER_EXISTS: &str = "User already exists";
pub const CLIENT_EXISTS: &str = "Client already exists";
pub const CPF_EXISTS: &str = "A client with this CPF already exists";
pub const PROCESSO_NUMBER_EXISTS: &str = "Process number already exists";
pub const ADDRESS_EXISTS: &str = "Client already has an address";
pub const AGENDAMENTO_EXISTS: &str = "Appointment already exists for this date and time";
pub const RECORD_EXISTS: &str = "A record with this value already exists";

// --- FORBIDDEN ---
pub const VIEW_OWN_DATA: &str = "You can only view your own data";
pub const UPDATE_OWN_DATA: &str = "You can only update your own data";
pub const VIEW_OWN_ADDRESS: &str = "You can only view your own address";
pub const UPDATE_OWN_ADDRESS: &str = "You can only update your own address";
pub const CANNOT_CHANGE_ROLE: &str = "You cannot change your own role";
pub const NO_PERMISSION: &str = "You do not have permission to access this resource";

// --- BAD REQUEST ---
pub const PAST_APPOINTMENT: &str = "Cannot schedule appointment for a past date";
pub const NO_FILE: &str = "No file provided";
pub const FILE_TOO_LARGE: &str = "File too large. Maximum size is 5MB";

// --- AUTH ---
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const INVALID_SESSION_TOKEN: &str = "Token is not valid or has expired";
pub const LOGIN_SUCCESS: &str = "Login successful";
pub const LOGOUT_SUCCESS: &str = "Logout successful";
pub const TOO_MANY_REQUESTS: &str = "ThrottlerException: Too Many Requests";

// --- PASSWORD RESET ---
pub const RESET_EMAIL_SENT: &str = "If the email exists, a reset link has been sent";
pub const RESET_SUCCESS: &str = "Password reset successfully";
pub const RESET_INVALID_TOKEN: &str = "Invalid or expired reset token";
pub const RESET_TOKEN_USED: &str = "This reset token has already been used";
pub const RESET_TOKEN_EXPIRED: &str = "This reset token has expired";

// --- INTERNAL ---
pub const INTERNAL_ERROR: &str = "Internal server error";
