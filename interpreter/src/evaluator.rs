use endo::instruction::{ArrayIndex, Instruction};
use log::debug;

use crate::environment::VariableStore;
use crate::error::RuntimeError;
use crate::runtime_value::Value;

/// Evaluate one instruction against the store.
///
/// `Ok(Some(line))` is a line to print and `Ok(None)` a silent store update.
/// Every `Err` is recoverable: its `Display` is the line to print in place of
/// the instruction's output.
pub fn evaluate(
    instruction: &Instruction,
    store: &mut VariableStore,
) -> Result<Option<String>, RuntimeError> {
    match instruction {
        Instruction::Assign { name, value, .. } => {
            debug!("{} <- text {:?}", name, value);
            store.set(name, Value::Text(value.clone()));
            Ok(None)
        }

        Instruction::PrintLiteral { text, .. } => Ok(Some(text.clone())),

        Instruction::PrintVariable { name, .. } => match store.get(name) {
            Some(value) => Ok(Some(value.to_string())),
            None => Err(RuntimeError::UndefinedVariable(name.clone())),
        },

        Instruction::DeclareArray { name, elements, .. } => {
            let elements: Vec<String> = elements.iter().map(|e| e.trim().to_string()).collect();
            debug!("{} <- list of {}", name, elements.len());
            store.set(name, Value::List(elements));
            Ok(None)
        }

        Instruction::AccessArray {
            target,
            array,
            index,
            ..
        } => {
            let element = lookup_element(store, array, index)?.to_string();
            debug!("{} <- {}[{}]", target, array, index);
            store.set(target, Value::Text(element));
            Ok(None)
        }

        Instruction::StandaloneArrayAccess { array, index, .. } => {
            lookup_element(store, array, index).map(|element| Some(element.to_string()))
        }
    }
}

/// Fetch `array[index]`, checking that `array` holds a list first.
fn lookup_element<'s>(
    store: &'s VariableStore,
    array: &str,
    index: &ArrayIndex,
) -> Result<&'s str, RuntimeError> {
    let elements = match store.get(array) {
        Some(Value::List(elements)) => elements,
        Some(other) => {
            debug!("{} holds {}, not a list", array, other.type_name());
            return Err(RuntimeError::NotAnArray(array.to_string()));
        }
        None => return Err(RuntimeError::NotAnArray(array.to_string())),
    };

    index
        .position(elements.len())
        .map(|i| elements[i].as_str())
        .ok_or_else(|| RuntimeError::IndexOutOfBounds(index.to_string()))
}
