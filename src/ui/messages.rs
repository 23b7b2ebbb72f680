//! User-facing strings (pt-BR).

pub const BOOKING_CONFIRMED: &str =
    "Agendamento confirmado! Você receberá uma confirmação em breve.";
pub const BOOKING_FAILED: &str = "Erro ao realizar agendamento. Tente novamente.";
pub const REQUIRED_FIELDS: &str = "Por favor, preencha todos os campos obrigatórios.";
pub const SLOTS_LOAD_FAILED: &str = "Erro ao carregar horários disponíveis.";
pub const SLOT_CREATED: &str = "Horário criado com sucesso!";
pub const SLOT_CREATE_FAILED: &str = "Erro ao criar horário.";
pub const INVALID_DATE: &str = "Data inválida.";

pub const NO_SLOTS: &str = "Nenhum horário disponível para esta data.";
pub const NO_APPOINTMENTS: &str = "Nenhum agendamento para esta data.";
pub const LOADING: &str = "Carregando...";

pub const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

pub const WEEKDAYS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

pub const HELP: &str = "\
Comandos:
  data AAAA-MM-DD | hoje        selecionar data
  mes anterior | proximo        navegar no calendário
  horario N                     escolher o horário N
  nome TEXTO                    nome do cliente
  whatsapp NUMERO               WhatsApp do cliente
  obs TEXTO                     observações
  agendar                       confirmar agendamento
  admin                         alternar modo cliente/administrador
  aba agendamentos|novo|calendario
  novo data|hora|tipo VALOR     formulário de novo horário
  criar                         criar horário
  ok                            fechar notificação
  ajuda                         esta ajuda
  sair                          encerrar";
