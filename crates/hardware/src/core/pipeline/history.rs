//! Per-instruction timing history.
//!
//! Every instruction that Fetch latches as valid gets a trace: its address, word,
//! disassembly, and the stage it occupied in each cycle. Traces live in a slot arena
//! addressed by [`TraceId`], so latches carry a small `Copy` handle instead of owning
//! any diagnostic data. The arena is pure diagnostics; nothing in the datapath reads it.
//!
//! Retired traces are kept until the timing diagram is dumped, bounded by a
//! configurable backlog so a long run cannot grow without limit.

use std::collections::VecDeque;
use std::fmt;

use crate::common::bits::Word;
use crate::core::pipeline::latches::PipeState;
use crate::isa::disasm::disassemble;

/// Handle to a trace in a [`TraceArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TraceId(u32);

impl TraceId {
    /// Slot index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stage an instruction occupied during one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageMark {
    /// Being fetched.
    Fetch,
    /// In the Decode latch.
    Decode,
    /// In the AGEX latch.
    Agex,
    /// In the Memory latch.
    Memory,
    /// In the Store latch.
    Store,
}

impl StageMark {
    /// Single-letter label used in the timing diagram.
    pub const fn letter(self) -> char {
        match self {
            Self::Fetch => 'F',
            Self::Decode => 'D',
            Self::Agex => 'E',
            Self::Memory => 'M',
            Self::Store => 'S',
        }
    }
}

/// One cell of a trace's timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleMark {
    /// Cycle number.
    pub cycle: u64,
    /// Stage occupied.
    pub stage: StageMark,
    /// The instruction was held in the same latch for the next cycle.
    pub stalled: bool,
}

impl fmt::Display for CycleMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stage.letter())?;
        if self.stalled {
            f.write_str("*")?;
        }
        Ok(())
    }
}

/// Timing record of one dynamic instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionTrace {
    /// Fetch address.
    pub pc: Word,
    /// Instruction word.
    pub ir: Word,
    /// Assembly rendering of `ir`.
    pub disassembly: String,
    /// Cycle in which the instruction was fetched.
    pub fetch_cycle: u64,
    /// Timeline, oldest first.
    pub marks: Vec<CycleMark>,
    /// Reached the Store stage.
    pub retired: bool,
    /// Data-cache address, once the instruction has accessed the data cache.
    pub mem_addr: Option<Word>,
}

/// Slot arena of instruction traces.
#[derive(Clone, Debug)]
pub struct TraceArena {
    slots: Vec<Option<InstructionTrace>>,
    free: Vec<u32>,
    order: VecDeque<TraceId>,
    retired: usize,
    limit: usize,
}

impl TraceArena {
    /// Creates an empty arena keeping at most `limit` retired traces.
    pub fn new(limit: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: VecDeque::new(),
            retired: 0,
            limit,
        }
    }

    /// Starts a trace for an instruction fetched in `cycle`.
    pub fn allocate(&mut self, pc: Word, ir: Word, cycle: u64) -> TraceId {
        let trace = InstructionTrace {
            pc,
            ir,
            disassembly: disassemble(ir.value() as u16),
            fetch_cycle: cycle,
            marks: vec![CycleMark {
                cycle,
                stage: StageMark::Fetch,
                stalled: false,
            }],
            retired: false,
            mem_addr: None,
        };

        let id = if let Some(slot) = self.free.pop() {
            self.slots[slot as usize] = Some(trace);
            TraceId(slot)
        } else {
            self.slots.push(Some(trace));
            TraceId((self.slots.len() - 1) as u32)
        };
        self.order.push_back(id);
        id
    }

    /// Looks up a live trace.
    pub fn get(&self, id: TraceId) -> Option<&InstructionTrace> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: TraceId) -> Option<&mut InstructionTrace> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Number of live traces.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no traces are live.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live traces in fetch order.
    pub fn iter(&self) -> impl Iterator<Item = &InstructionTrace> + '_ {
        self.order.iter().filter_map(|id| self.get(*id))
    }

    /// Appends one cycle's marks for every valid latch occupant.
    ///
    /// `current` is the state the stages read this cycle and `next` the state they
    /// produced; an occupant found in the same latch of `next` is marked as stalled.
    pub fn record(&mut self, current: &PipeState, next: &PipeState, cycle: u64) {
        let occupants = [
            (current.decode.live(), next.decode.live(), StageMark::Decode, None),
            (current.agex.live(), next.agex.live(), StageMark::Agex, None),
            (
                current.memory.live(),
                next.memory.live(),
                StageMark::Memory,
                current
                    .memory
                    .live()
                    .filter(|_| current.memory.cs.dcache_en)
                    .map(|instr| instr.address),
            ),
            (current.store.live(), None, StageMark::Store, None),
        ];

        for (now, then, stage, mem_addr) in occupants {
            let Some(id) = now.and_then(|instr| instr.trace) else {
                continue;
            };
            let stalled = then.and_then(|instr| instr.trace) == Some(id);
            let Some(trace) = self.get_mut(id) else {
                continue;
            };
            trace.marks.push(CycleMark {
                cycle,
                stage,
                stalled,
            });
            if mem_addr.is_some() {
                trace.mem_addr = mem_addr;
            }
            if stage == StageMark::Store && !trace.retired {
                trace.retired = true;
                self.retired += 1;
            }
        }

        self.trim_retired();
    }

    /// Drops the oldest retired traces beyond the backlog limit.
    fn trim_retired(&mut self) {
        while self.retired > self.limit {
            let Some(pos) = self
                .order
                .iter()
                .position(|id| self.get(*id).is_some_and(|t| t.retired))
            else {
                break;
            };
            if let Some(id) = self.order.remove(pos) {
                self.release(id);
            }
        }
    }

    fn release(&mut self, id: TraceId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            if slot.take().is_some_and(|t| t.retired) {
                self.retired -= 1;
            }
            self.free.push(id.0);
        }
    }

    /// Removes and returns every retired trace, in fetch order.
    ///
    /// In-flight traces stay in the arena.
    pub fn take_retired(&mut self) -> Vec<InstructionTrace> {
        let mut taken = Vec::with_capacity(self.retired);
        let mut kept = VecDeque::with_capacity(self.order.len());
        while let Some(id) = self.order.pop_front() {
            if self.get(id).is_some_and(|t| t.retired) {
                if let Some(trace) = self.slots.get_mut(id.index()).and_then(Option::take) {
                    taken.push(trace);
                }
                self.free.push(id.0);
            } else {
                kept.push_back(id);
            }
        }
        self.order = kept;
        self.retired = 0;
        taken
    }

    /// Frees every retired trace without handing it back.
    ///
    /// In-flight traces stay in the arena, in fetch order.
    pub fn evict_retired(&mut self) {
        let order = std::mem::take(&mut self.order);
        for id in order {
            if self.get(id).is_some_and(|t| t.retired) {
                self.release(id);
            } else {
                self.order.push_back(id);
            }
        }
    }

    /// Drops every trace.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.order.clear();
        self.retired = 0;
    }
}

impl Default for TraceArena {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}
